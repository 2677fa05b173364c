//! Reports of verified laws

use serde::{Deserialize, Serialize};

use crate::error::LawResult;

/// One law and the number of samples it held on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawOutcome {
    pub law: String,
    pub samples: usize,
}

/// Every law verified for one subject (an instance or construction)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawReport {
    pub subject: String,
    pub outcomes: Vec<LawOutcome>,
}

impl LawReport {
    pub fn new(subject: impl Into<String>) -> Self {
        Self { subject: subject.into(), outcomes: Vec::new() }
    }

    pub fn record(&mut self, law: impl Into<String>, samples: usize) {
        self.outcomes.push(LawOutcome { law: law.into(), samples });
    }

    /// Append the outcomes of another report on the same subject
    pub fn merge(mut self, other: LawReport) -> Self {
        self.outcomes.extend(other.outcomes);
        self
    }

    pub fn laws(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().map(|outcome| outcome.law.as_str())
    }

    pub fn total_samples(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.samples).sum()
    }

    pub fn to_json(&self) -> LawResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_totals() {
        let mut report = LawReport::new("Option");
        report.record("left identity", 4);
        report.record("right identity", 6);
        assert_eq!(report.total_samples(), 10);
        assert_eq!(report.laws().collect::<Vec<_>>(), vec!["left identity", "right identity"]);
    }

    #[test]
    fn test_json_shape() {
        let mut report = LawReport::new("Option");
        report.record("left identity", 1);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["subject"], "Option");
        assert_eq!(json["outcomes"][0]["samples"], 1);
    }
}
