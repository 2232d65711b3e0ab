//! LLM verdict

use serde::Deserialize;
use std::fmt;

/// Raw text returned by the model, forwarded to the operator as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict(String);

/// Structured reading of a verdict, when the model honoured the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Assessment {
    pub contains_uac: bool,
    #[serde(default)]
    pub should_manually_review: bool,
}

impl Verdict {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort parse. Schema-constrained output is not guaranteed, so
    /// callers must not rely on this returning `Some`.
    pub fn assessment(&self) -> Option<Assessment> {
        serde_json::from_str(self.0.trim()).ok()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_parses_schema_output() {
        let verdict = Verdict::new(r#"{"contains_uac":true,"should_manually_review":false}"#);
        assert_eq!(
            verdict.assessment(),
            Some(Assessment {
                contains_uac: true,
                should_manually_review: false,
            })
        );
    }

    #[test]
    fn test_assessment_tolerates_missing_review_flag() {
        let verdict = Verdict::new(r#" {"contains_uac": false} "#);
        let assessment = verdict.assessment().unwrap();
        assert!(!assessment.contains_uac);
        assert!(!assessment.should_manually_review);
    }

    #[test]
    fn test_non_json_verdict_is_kept_verbatim() {
        let verdict = Verdict::new("I think it does.");
        assert!(verdict.assessment().is_none());
        assert_eq!(verdict.to_string(), "I think it does.");
    }
}
