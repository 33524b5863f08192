use std::fmt::{Debug, Formatter};

use crate::primordials::Realm;
use crate::result::JsResult;
use crate::values::value::RuntimeValue;

pub type BuiltinFn =
    fn(realm: &Realm, target: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult;

/// A native function body. `arity` becomes the function object's `length`.
#[derive(Clone)]
pub struct BuiltIn {
    pub op: BuiltinFn,
    pub name: &'static str,
    pub arity: usize,
}

impl BuiltIn {
    pub fn new(name: &'static str, arity: usize, op: BuiltinFn) -> Self {
        BuiltIn { op, name, arity }
    }

    pub fn apply(
        &self,
        realm: &Realm,
        target: &RuntimeValue,
        arguments: &[RuntimeValue],
    ) -> JsResult {
        log::trace!("Calling builtin {} with {} arguments", self.name, arguments.len());

        (self.op)(realm, target, arguments)
    }
}

impl PartialEq for BuiltIn {
    fn eq(&self, other: &Self) -> bool {
        self.op as usize == other.op as usize
    }
}

impl Debug for BuiltIn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[Function: {}]", self.name))
    }
}

/// Reads the argument at `index`, treating missing arguments as `undefined`.
pub(crate) fn argument(arguments: &[RuntimeValue], index: usize) -> RuntimeValue {
    arguments.get(index).cloned().unwrap_or_default()
}
