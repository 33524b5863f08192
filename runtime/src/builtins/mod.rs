use crate::result::{ExecutionError, JsResult};
use crate::{JsObject, RuntimeValue};

pub(crate) mod array;
pub(crate) mod objects;

#[inline]
pub(crate) fn object_target<'v>(target: &'v RuntimeValue, method: &str) -> JsResult<&'v JsObject> {
    match target {
        RuntimeValue::Object(obj) => Ok(obj),
        other => Err(ExecutionError::TypeError(format!(
            "{} called on non-object {}",
            method, other
        ))),
    }
}
