use crate::values::value::RuntimeValue;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone)]
pub enum ExecutionError {
    Thrown(RuntimeValue),
    TypeError(String),
    InternalError(InternalError),
}

#[derive(Debug, Clone)]
pub struct InternalError {
    message: String,
}

impl InternalError {
    pub fn new(message: impl Into<String>) -> Self {
        InternalError {
            message: message.into(),
        }
    }
}

impl Display for InternalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl ExecutionError {
    pub fn render(self) -> anyhow::Error {
        match self {
            ExecutionError::TypeError(message) => {
                anyhow::Error::msg(format!("TypeError: {}", message))
            }
            ExecutionError::InternalError(err) => {
                anyhow::Error::msg(format!("InternalError: {}", err.message))
            }
            ExecutionError::Thrown(value) => anyhow::Error::msg(format!("Uncaught {}", value)),
        }
    }
}

impl<T> From<InternalError> for JsResult<T> {
    fn from(err: InternalError) -> Self {
        Err(ExecutionError::InternalError(err))
    }
}

impl From<InternalError> for ExecutionError {
    fn from(err: InternalError) -> Self {
        ExecutionError::InternalError(err)
    }
}

impl From<RuntimeValue> for ExecutionError {
    fn from(err: RuntimeValue) -> Self {
        ExecutionError::Thrown(err)
    }
}

impl From<ExecutionError> for anyhow::Error {
    fn from(err: ExecutionError) -> Self {
        err.render()
    }
}

pub type JsResult<T = RuntimeValue> = std::result::Result<T, ExecutionError>;

#[cfg(test)]
mod test {
    use crate::{ExecutionError, InternalError, JsResult};

    #[test]
    fn test_render_type_error() {
        let error: anyhow::Error = ExecutionError::TypeError("not a function".to_owned()).into();

        assert_eq!(error.to_string(), "TypeError: not a function");
    }

    #[test]
    fn test_internal_error_into_result() {
        let result: JsResult<()> = InternalError::new("unsupported").into();

        assert_eq!(
            result.unwrap_err().render().to_string(),
            "InternalError: unsupported"
        );
    }
}
