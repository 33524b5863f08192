use serde::Deserialize;

/// How many attribute mismatches a failed check reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Report {
    #[default]
    All,
    First,
}

/// Per-call knobs, in the spirit of the harness's `verifyProperty(..., options)`.
///
/// The probes observe behaviour (assignment, enumeration, deletability)
/// rather than trusting the reported descriptor. All are on by default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VerifyOptions {
    pub report: Report,
    pub probe_writability: bool,
    pub probe_enumerability: bool,
    pub probe_configurability: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        VerifyOptions {
            report: Report::All,
            probe_writability: true,
            probe_enumerability: true,
            probe_configurability: true,
        }
    }
}

impl VerifyOptions {
    /// Compares the reported descriptor only, touching nothing.
    pub fn descriptor_only() -> Self {
        VerifyOptions {
            probe_writability: false,
            probe_enumerability: false,
            probe_configurability: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }
}

#[cfg(test)]
mod test {
    use crate::options::{Report, VerifyOptions};

    #[test]
    fn test_missing_fields_use_defaults() {
        let options: VerifyOptions = serde_json::from_str(r#"{ "report": "first" }"#).unwrap();

        assert_eq!(options.report, Report::First);
        assert!(options.probe_writability);
        assert!(options.probe_enumerability);
        assert!(options.probe_configurability);
    }

    #[test]
    fn test_descriptor_only() {
        let options = VerifyOptions::descriptor_only();

        assert_eq!(options.report, Report::All);
        assert!(!options.probe_writability);
    }
}
