use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Key seeded by [`Config::setup`] with the application's root directory.
pub const ROOT_PATH: &str = "root_path";

/// Key holding the path of the manifest an application was booted from.
pub const MANIFEST: &str = "manifest";

#[derive(Debug, Error)]
#[error("config entry '{key}' has an unexpected shape: {source}")]
pub struct ConfigError {
    key: String,
    #[source]
    source: serde_json::Error,
}

/// Per-application key-value settings.
///
/// A fresh store holds the defaults only. Values are JSON so the manifest's
/// `config` object can be merged in as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    values: IndexMap<String, JsonValue>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            values: defaults(),
        }
    }
}

fn defaults() -> IndexMap<String, JsonValue> {
    IndexMap::from([(ROOT_PATH.to_string(), JsonValue::from("."))])
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the defaults, then overlay `initial`.
    pub fn setup<I, K, V>(&mut self, initial: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<JsonValue>,
    {
        self.values = defaults();
        self.values
            .extend(initial.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }

    /// Set `key`, overwriting any existing or default value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove `key` and return what it held.
    pub fn delete(&mut self, key: &str) -> Option<JsonValue> {
        self.values.shift_remove(key)
    }

    /// The value at `key`, or `default` when it is unset.
    pub fn fetch(&self, key: &str, default: impl Into<JsonValue>) -> JsonValue {
        match self.values.get(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Deserialize the value at `key`. `Ok(None)` when the key is unset.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        self.values
            .get(key)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|source| ConfigError {
                    key: key.to_string(),
                    source,
                })
            })
            .transpose()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
