//! Metric identity: name plus a normalized label set.
//!
//! Labels are flattened into a sorted key vector so that callers passing the
//! same pairs in a different order resolve to the same series.

use std::fmt::{self, Write};

/// Escape a label value for the text exposition format.
pub fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Sorted `(key, value)` pairs attached to a series.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelSet(Vec<(String, String)>);

impl LabelSet {
    pub fn new(labels: &[(&str, &str)]) -> Self {
        let mut pairs: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        pairs.sort();
        Self(pairs)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Same keys, every value replaced by `value`.
    pub fn with_all_values(&self, value: &str) -> Self {
        Self(self.0.iter().map(|(k, _)| (k.clone(), value.to_string())).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Write `k1="v1",k2="v2"` without braces.
    pub fn write_pairs(&self, out: &mut String) {
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}=\"{}\"", k, escape_label(v));
        }
    }
}

/// `{k="v",...}`, or nothing for an empty set.
impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut pairs = String::new();
        self.write_pairs(&mut pairs);
        write!(f, "{{{}}}", pairs)
    }
}

/// Series identity within one store class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetricKey {
    pub name: String,
    pub labels: LabelSet,
}

impl MetricKey {
    pub fn new(name: &str, labels: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            labels: LabelSet::new(labels),
        }
    }

    /// Smallest key with this name; the lower bound of a family range.
    pub fn family_start(name: &str) -> Self {
        Self {
            name: name.to_string(),
            labels: LabelSet::default(),
        }
    }

    pub fn overflowed(self, value: &str) -> Self {
        Self {
            labels: self.labels.with_all_values(value),
            name: self.name,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.labels)
    }
}
