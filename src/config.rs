use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::{CaptureError, Result};
use crate::kernel::record::{format_number, Metric};
use crate::kernel::recorders::{BuiltinRecorder, Recorder};

pub const DEFAULT_HOST: &str = "http://127.0.0.1";
pub const DEFAULT_PORT: &str = "8088";

/// Session configuration. Absent fields fall back to the defaults.
///
/// Custom recorders cannot come from JSON; add them with
/// [`Config::with_recorder`].
#[derive(Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    /// `None` means no `:port` suffix on the endpoint.
    #[serde(deserialize_with = "deserialize_port")]
    pub port: Option<String>,
    /// Built-in recorder name to flag. Only an explicit `false` disables.
    /// `None` (a falsy `enabled` in JSON) switches every built-in off.
    #[serde(deserialize_with = "deserialize_enabled")]
    pub enabled: Option<BTreeMap<String, Value>>,
    /// Seed merged into the record before any recorder runs.
    #[serde(deserialize_with = "deserialize_data")]
    pub data: BTreeMap<String, Metric>,
    #[serde(skip)]
    pub recorders: Vec<(String, Box<dyn Recorder>)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: Some(DEFAULT_PORT.to_string()),
            enabled: Some(BTreeMap::new()),
            data: BTreeMap::new(),
            recorders: Vec::new(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let custom: Vec<&str> = self.recorders.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("enabled", &self.enabled)
            .field("data", &self.data)
            .field("recorders", &custom)
            .finish()
    }
}

impl Config {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CaptureError::ConfigFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_port(mut self, port: Option<&str>) -> Self {
        self.port = port.filter(|p| !p.is_empty()).map(str::to_string);
        self
    }

    pub fn with_enabled(mut self, name: &str, enabled: bool) -> Self {
        self.enabled
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), Value::Bool(enabled));
        self
    }

    pub fn with_data(mut self, key: &str, value: impl Into<Metric>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Custom recorders always run, after the built-ins, in the order added.
    pub fn with_recorder(mut self, name: &str, recorder: impl Recorder + 'static) -> Self {
        let recorder: Box<dyn Recorder> = Box::new(recorder);
        self.recorders.push((name.to_string(), recorder));
        self
    }

    pub fn is_enabled(&self, builtin: BuiltinRecorder) -> bool {
        match &self.enabled {
            Some(flags) => !matches!(flags.get(builtin.name()), Some(Value::Bool(false))),
            None => false,
        }
    }

    /// `<host>[:<port>]`
    pub fn endpoint(&self) -> String {
        match &self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    // Falsy values (null, false, 0, "") drop the port.
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some("true".to_string())),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        Value::Number(n) => Ok(Some(match n.as_f64() {
            Some(f) => format_number(f),
            None => n.to_string(),
        })),
        other => Err(de::Error::custom(format!(
            "port must be a string or number, got {}",
            other
        ))),
    }
}

fn deserialize_enabled<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<BTreeMap<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        Value::Object(flags) => Ok(Some(flags.into_iter().collect())),
        // Truthy but not a map: no flag can be `false`, so all stay on.
        _ => Ok(Some(BTreeMap::new())),
    }
}

fn deserialize_data<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, Metric>, D::Error>
where
    D: Deserializer<'de>,
{
    let seed = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(BTreeMap::new()),
        Value::Object(seed) => seed,
        other => return Err(de::Error::custom(format!("data must be an object, got {}", other))),
    };

    seed.into_iter()
        .map(|(key, value)| {
            let metric = match value {
                Value::Number(n) => Metric::Number(n.as_f64().unwrap_or(0.0)),
                Value::String(s) => Metric::Text(s),
                Value::Bool(b) => Metric::Text(b.to_string()),
                Value::Null => Metric::Text(String::new()),
                nested => {
                    return Err(de::Error::custom(format!(
                        "data.{} must be a number, string or bool, got {}",
                        key, nested
                    )))
                }
            };
            Ok((key, metric))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_fill_absent_fields() {
        let config = Config::from_value(json!({})).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.endpoint(), "http://127.0.0.1:8088");
        assert_eq!(config.enabled, Some(BTreeMap::new()));
        assert!(config.data.is_empty());
    }

    #[test]
    fn test_numeric_port() {
        let config = Config::from_value(json!({ "host": "https://c.example", "port": 9000 })).unwrap();
        assert_eq!(config.endpoint(), "https://c.example:9000");
    }

    #[test]
    fn test_falsy_port_drops_suffix() {
        for port in [json!(""), json!(0), json!(null), json!(false)] {
            let config = Config::from_value(json!({ "host": "https://c.example", "port": port })).unwrap();
            assert_eq!(config.endpoint(), "https://c.example", "port {:?}", config.port);
        }
    }

    #[test]
    fn test_only_explicit_false_disables() {
        let config = Config::from_value(json!({
            "enabled": { "pageClicks": false, "scrollDistance": "no", "windowSize": 0 }
        }))
        .unwrap();

        assert!(!config.is_enabled(BuiltinRecorder::PageClicks));
        assert!(config.is_enabled(BuiltinRecorder::ScrollDistance));
        assert!(config.is_enabled(BuiltinRecorder::WindowSize));
        assert!(config.is_enabled(BuiltinRecorder::UserAgent));
    }

    #[test]
    fn test_integral_float_port_has_no_fraction() {
        let config = Config::from_value(json!({ "host": "https://c.example", "port": 8088.0 })).unwrap();
        assert_eq!(config.endpoint(), "https://c.example:8088");
    }

    #[test]
    fn test_falsy_enabled_switches_builtins_off() {
        for enabled in [json!(null), json!(false), json!(0), json!("")] {
            let config = Config::from_value(json!({ "enabled": enabled })).unwrap();
            assert_eq!(config.enabled, None);
            for builtin in BuiltinRecorder::ALL {
                assert!(!config.is_enabled(builtin), "{} should be off", builtin.name());
            }
        }
    }

    #[test]
    fn test_truthy_non_map_enabled_keeps_builtins_on() {
        let config = Config::from_value(json!({ "enabled": true })).unwrap();
        assert!(BuiltinRecorder::ALL.iter().all(|b| config.is_enabled(*b)));
    }

    #[test]
    fn test_with_enabled_after_falsy_enabled() {
        let config = Config::from_value(json!({ "enabled": null }))
            .unwrap()
            .with_enabled("pageClicks", true);
        assert!(config.is_enabled(BuiltinRecorder::PageClicks));
    }

    #[test]
    fn test_null_data_is_empty() {
        let config = Config::from_value(json!({ "data": null })).unwrap();
        assert!(config.data.is_empty());
    }

    #[test]
    fn test_data_seed_bools_become_text() {
        let config = Config::from_value(json!({ "data": { "loggedIn": true, "beta": false, "ref": null } })).unwrap();
        assert_eq!(config.data.get("loggedIn"), Some(&Metric::Text("true".to_string())));
        assert_eq!(config.data.get("beta"), Some(&Metric::Text("false".to_string())));
        assert_eq!(config.data.get("ref"), Some(&Metric::Text(String::new())));
    }

    #[test]
    fn test_nested_data_seed_is_rejected() {
        assert!(Config::from_value(json!({ "data": { "cart": [1, 2] } })).is_err());
    }

    #[test]
    fn test_data_seed_accepts_numbers_and_strings() {
        let config = Config::from_value(json!({ "data": { "path": "/custom", "abVariant": 2 } })).unwrap();
        assert_eq!(config.data.get("path"), Some(&Metric::Text("/custom".to_string())));
        assert_eq!(config.data.get("abVariant"), Some(&Metric::Number(2.0)));
    }

    #[test]
    fn test_object_port_is_rejected() {
        assert!(Config::from_value(json!({ "port": { "n": 1 } })).is_err());
    }
}
