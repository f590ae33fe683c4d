use indexmap::IndexMap;
use serde::Serialize;
use std::ops::Index;

use crate::value::Value;

/// Result of a successful [`OptionParser::parse`](crate::OptionParser::parse).
///
/// Values are keyed by option name and seeded with every declared default
/// before parsing starts. The container exposes no way to change it once
/// returned:
///
/// ```compile_fail
/// let mut parsed = imp_options::OptionParser::new([]).parse(Vec::<String>::new()).unwrap();
/// parsed.leading_non_opts().push("late".to_string());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedArguments {
    values: IndexMap<String, Value>,
    leading_non_opts: Vec<String>,
    trailing_non_opts: Vec<String>,
}

impl ParsedArguments {
    pub(crate) fn new(
        values: IndexMap<String, Value>,
        leading_non_opts: Vec<String>,
        trailing_non_opts: Vec<String>,
    ) -> Self {
        Self {
            values,
            leading_non_opts,
            trailing_non_opts,
        }
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&Value> {
        self.values.get(name.as_ref())
    }

    pub fn contains_key(&self, name: impl AsRef<str>) -> bool {
        self.values.contains_key(name.as_ref())
    }

    /// Whether the named value is `Bool(true)`.
    pub fn is_set(&self, name: impl AsRef<str>) -> bool {
        self.get(name).is_some_and(Value::is_true)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Tokens that preceded the first switch.
    pub fn leading_non_opts(&self) -> &[String] {
        &self.leading_non_opts
    }

    /// Tokens left once switch consumption stopped.
    pub fn trailing_non_opts(&self) -> &[String] {
        &self.trailing_non_opts
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParsedArguments {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Default::default()
        }
    }
}

impl Index<&str> for ParsedArguments {
    type Output = Value;

    /// Panics when `name` has no value, like `HashMap` indexing.
    fn index(&self, name: &str) -> &Value {
        match self.values.get(name) {
            Some(value) => value,
            None => panic!("no value for option '{name}'"),
        }
    }
}
