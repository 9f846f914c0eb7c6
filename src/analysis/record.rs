use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

/// Sentiment label vocabulary.
///
/// The set of labels a given analysis can actually produce is fixed by the
/// loaded checkpoint, not by this code: the English SST-2 checkpoint emits
/// only `POSITIVE`/`NEGATIVE`, the multilingual checkpoint also emits
/// `NEUTRAL`. Parsing is case-insensitive because checkpoints disagree on
/// label casing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

/// A classifier emitted a label outside the known vocabulary.
#[derive(Debug, Error)]
#[error("unknown sentiment label '{0}'")]
pub struct UnknownLabel(pub String);

impl FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "POSITIVE" => Ok(Label::Positive),
            "NEGATIVE" => Ok(Label::Negative),
            "NEUTRAL" => Ok(Label::Neutral),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Label::Positive => "POSITIVE",
            Label::Negative => "NEGATIVE",
            Label::Neutral => "NEUTRAL",
        };
        write!(f, "{name}")
    }
}

/// One analyzed text: the verbatim input, its predicted sentiment, the
/// model's confidence rounded to two decimals, and the extracted keywords as
/// a display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub text: String,
    pub sentiment: Label,
    pub confidence: f32,
    pub keywords: String,
}

/// Ordered collection of analysis records, one per input text.
///
/// Created fresh per analysis request; it lives only for the duration of a
/// single display/export cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub records: Vec<AnalysisRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnalysisRecord> {
        self.records.iter()
    }

    /// Number of records per label, for the label-distribution chart.
    pub fn label_counts(&self) -> BTreeMap<Label, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.sentiment).or_insert(0) += 1;
        }
        counts
    }
}

impl From<Vec<AnalysisRecord>> for ResultSet {
    fn from(records: Vec<AnalysisRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a AnalysisRecord;
    type IntoIter = std::slice::Iter<'a, AnalysisRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("POSITIVE".parse::<Label>().unwrap(), Label::Positive);
        assert_eq!("negative".parse::<Label>().unwrap(), Label::Negative);
        assert_eq!("Neutral".parse::<Label>().unwrap(), Label::Neutral);
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!("MIXED".parse::<Label>().is_err());
    }

    #[test]
    fn label_serializes_uppercase() {
        let json = serde_json::to_string(&Label::Positive).unwrap();
        assert_eq!(json, "\"POSITIVE\"");
    }

    #[test]
    fn label_counts_cover_all_records() {
        let results = ResultSet::from(vec![
            AnalysisRecord {
                text: "good".into(),
                sentiment: Label::Positive,
                confidence: 0.99,
                keywords: "good".into(),
            },
            AnalysisRecord {
                text: "bad".into(),
                sentiment: Label::Negative,
                confidence: 0.98,
                keywords: "bad".into(),
            },
            AnalysisRecord {
                text: "also good".into(),
                sentiment: Label::Positive,
                confidence: 0.72,
                keywords: "good".into(),
            },
        ]);

        let counts = results.label_counts();
        assert_eq!(counts[&Label::Positive], 2);
        assert_eq!(counts[&Label::Negative], 1);
        assert!(!counts.contains_key(&Label::Neutral));
    }
}
