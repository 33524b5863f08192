#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod descriptor;
mod error;
mod guard;
mod options;
mod reflect;
mod verify;

pub use descriptor::{Accessor, ActualDescriptor, Attribute, ExpectedDescriptor};
pub use error::{AttributeMismatch, VerificationError};
pub use options::{Report, VerifyOptions};
pub use reflect::PropertyReflection;
pub use verify::{
    verify_configurable, verify_enumerable, verify_equal_to, verify_intrinsic,
    verify_not_configurable, verify_not_enumerable, verify_not_writable, verify_property,
    verify_property_with, verify_writable, Verification,
};
