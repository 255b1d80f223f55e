use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single value in the data record. Untagged so records serialize as
/// plain JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(f64),
    Text(String),
}

impl Metric {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Metric::Number(n) => Some(*n),
            Metric::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Metric::Text(s) => Some(s),
            Metric::Number(_) => None,
        }
    }
}

/// Renders a number the way a browser stringifies it for a form body:
/// `3` not `3.0`, `0` for negative zero, exponent form outside
/// `[1e-6, 1e21)`.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        let infinity = if n > 0.0 { "Infinity" } else { "-Infinity" };
        return infinity.to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Number(n) => f.write_str(&format_number(*n)),
            Metric::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Metric {
    fn from(n: f64) -> Self {
        Metric::Number(n)
    }
}

impl From<&str> for Metric {
    fn from(s: &str) -> Self {
        Metric::Text(s.to_string())
    }
}

impl From<String> for Metric {
    fn from(s: String) -> Self {
        Metric::Text(s)
    }
}

/// Flat, lazily-populated mapping of metric name to value for one page view.
///
/// Keys only exist once something writes them. The numeric helpers treat
/// an absent key, or one holding text, as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataRecord {
    fields: BTreeMap<String, Metric>,
}

impl DataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Metric> {
        self.fields.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Metric::as_number)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Metric>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Only writes when the key is absent. Returns whether it wrote.
    pub fn set_default(&mut self, key: &str, value: impl Into<Metric>) -> bool {
        if self.contains(key) {
            return false;
        }
        self.set(key, value);
        true
    }

    /// Materializes the key as zero if it is not already a number.
    pub fn touch(&mut self, key: &str) -> f64 {
        let current = self.number(key).unwrap_or(0.0);
        self.set(key, current);
        current
    }

    pub fn add(&mut self, key: &str, delta: f64) -> f64 {
        let next = self.touch(key) + delta;
        self.set(key, next);
        next
    }

    pub fn increment(&mut self, key: &str) -> f64 {
        self.add(key, 1.0)
    }

    /// High-water mark: keeps the larger of the stored value and `candidate`.
    pub fn raise_to(&mut self, key: &str, candidate: f64) -> f64 {
        let next = self.touch(key).max(candidate);
        self.set(key, next);
        next
    }

    pub fn merge(&mut self, other: impl IntoIterator<Item = (String, Metric)>) {
        self.fields.extend(other);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Metric)> {
        self.fields.iter()
    }

    /// Key/value pairs ready for `application/x-www-form-urlencoded`.
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}
