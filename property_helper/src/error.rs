use serde::Serialize;
use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::descriptor::{Accessor, Attribute};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeMismatch {
    pub attribute: Attribute,
    pub expected: bool,
    pub actual: bool,
}

impl Display for AttributeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{}: expected {}, got {}",
            self.attribute, self.expected, self.actual
        ))
    }
}

fn render_mismatches(mismatches: &[AttributeMismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn outcome(observed: &bool, yes: &'static str, no: &'static str) -> &'static str {
    if *observed {
        yes
    } else {
        no
    }
}

/// Why a property did not match its expected descriptor.
///
/// Keys and values are rendered to strings so the error can leave the
/// (single-threaded) object model and be serialized by a runner.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum VerificationError {
    #[error("{key} is not an own property")]
    MissingProperty { key: String },

    #[error("{key} has value {actual}, expected {expected}")]
    ValueMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("{key} has {accessor} {actual}, expected {expected}")]
    AccessorMismatch {
        key: String,
        accessor: Accessor,
        expected: String,
        actual: String,
    },

    #[error("{key} descriptor mismatch ({})", render_mismatches(.mismatches))]
    AttributeMismatch {
        key: String,
        mismatches: Vec<AttributeMismatch>,
    },

    #[error(
        "{key} is declared writable: {declared} but assignment {}",
        outcome(.observed, "took effect", "was ignored")
    )]
    WritabilityCheckFailed {
        key: String,
        declared: bool,
        observed: bool,
    },

    #[error(
        "{key} is declared enumerable: {declared} but enumeration {}",
        outcome(.observed, "lists it", "skips it")
    )]
    EnumerabilityCheckFailed {
        key: String,
        declared: bool,
        observed: bool,
    },

    #[error(
        "{key} is declared configurable: {declared} but deletion {}",
        outcome(.observed, "is allowed", "is refused")
    )]
    ConfigurabilityCheckFailed {
        key: String,
        declared: bool,
        observed: bool,
    },

    #[error("{key} could not be restored after probing")]
    RestoreFailed { key: String },
}

impl VerificationError {
    pub fn key(&self) -> &str {
        match self {
            VerificationError::MissingProperty { key }
            | VerificationError::ValueMismatch { key, .. }
            | VerificationError::AccessorMismatch { key, .. }
            | VerificationError::AttributeMismatch { key, .. }
            | VerificationError::WritabilityCheckFailed { key, .. }
            | VerificationError::EnumerabilityCheckFailed { key, .. }
            | VerificationError::ConfigurabilityCheckFailed { key, .. }
            | VerificationError::RestoreFailed { key } => key,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::descriptor::Attribute;
    use crate::error::{AttributeMismatch, VerificationError};
    use serde_json::json;

    fn mismatch() -> VerificationError {
        VerificationError::AttributeMismatch {
            key: "length".to_owned(),
            mismatches: vec![
                AttributeMismatch {
                    attribute: Attribute::Writable,
                    expected: false,
                    actual: true,
                },
                AttributeMismatch {
                    attribute: Attribute::Configurable,
                    expected: true,
                    actual: false,
                },
            ],
        }
    }

    #[test]
    fn test_display_lists_every_attribute() {
        assert_eq!(
            mismatch().to_string(),
            "length descriptor mismatch (writable: expected false, got true; configurable: expected true, got false)"
        );
    }

    #[test]
    fn test_serialized_report() {
        let report = serde_json::to_value(mismatch()).unwrap();

        assert_eq!(
            report,
            json!({
                "kind": "AttributeMismatch",
                "key": "length",
                "mismatches": [
                    { "attribute": "writable", "expected": false, "actual": true },
                    { "attribute": "configurable", "expected": true, "actual": false },
                ],
            })
        );
    }

    #[test]
    fn test_probe_messages() {
        let error = VerificationError::WritabilityCheckFailed {
            key: "length".to_owned(),
            declared: false,
            observed: true,
        };

        assert_eq!(
            error.to_string(),
            "length is declared writable: false but assignment took effect"
        );
        assert_eq!(error.key(), "length");
    }
}
