#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::pedantic::large_types_passed_by_value,
    clippy::restriction::clone_on_ref_ptr
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]

mod builtins;
pub mod debugging;
mod primordials;
mod result;
mod values;

extern crate ahash;
extern crate anyhow;
extern crate colored;

pub use debugging::Debuggable;
pub use primordials::Realm;
pub use result::{ExecutionError, InternalError, JsResult};
pub use values::elements::{ArrayElements, MAX_LENGTH};
pub use values::function::{BuiltIn, BuiltinFn};
pub use values::object::{JsObject, JsObjectBuilder};
pub use values::property::{Property, PropertyDescriptor, PropertyKey};
pub use values::string::JsPrimitiveString;
pub use values::symbols::JsSymbol;
pub use values::value::RuntimeValue;
