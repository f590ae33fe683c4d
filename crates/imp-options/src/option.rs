use crate::error::{ParseError, ParseResult};
use crate::value::{Cast, Value};

/// A single declared switch.
///
/// Built through [`OptionDef::define`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDef {
    name: String,
    long: String,
    short: Option<String>,
    description: Option<String>,
    default: Option<Value>,
    cast: Option<Cast>,
    required: bool,
}

impl OptionDef {
    /// Start declaring an option called `name`.
    ///
    /// Unset fields are filled in by [`OptionBuilder::build`]:
    /// - `long` comes from the name (`dry_run` => `--dry-run`)
    /// - `short` is `-` plus the first letter of `long`, unless set or cleared
    /// - `cast` follows the type of `default`, unless set or cleared
    pub fn define(name: impl Into<String>) -> OptionBuilder {
        OptionBuilder::new(name)
    }

    /// Shorthand for an option with every field defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self::define(name).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn cast(&self) -> Option<Cast> {
        self.cast
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_boolean(&self) -> bool {
        self.cast == Some(Cast::Boolean)
    }

    pub fn is_numeric(&self) -> bool {
        self.cast == Some(Cast::Numeric)
    }

    /// Convert a raw switch value according to the option's cast.
    ///
    /// `None` means no value followed the switch. Non-numeric options treat
    /// that as plain presence and bind `true`.
    pub fn typecast(&self, raw: Option<&str>) -> ParseResult<Value> {
        if !self.is_numeric() {
            return Ok(raw.map_or(Value::Bool(true), Value::from));
        }

        let Some(raw) = raw else {
            return Err(ParseError::MissingValue(self.long.clone()));
        };
        if raw.chars().any(|c| !c.is_ascii_digit() && c != '.') {
            return Err(ParseError::NonNumeric(self.long.clone()));
        }

        if raw.contains('.') {
            Ok(Value::Float(leading_float(raw)))
        } else if raw.is_empty() {
            Ok(Value::Int(0))
        } else {
            raw.parse::<i64>()
                .map(Value::Int)
                .map_err(|_| ParseError::NonNumeric(self.long.clone()))
        }
    }
}

/// Float value of the longest `digits.digits` prefix; `0.0` when there is none.
fn leading_float(raw: &str) -> f64 {
    let end = raw
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .nth(1)
        .map_or(raw.len(), |(i, _)| i);
    raw[..end].parse::<f64>().unwrap_or(0.0)
}

/// Long form derived from an option name: lowercased, anything outside
/// `[a-z-]` replaced by `-`, runs of `-` collapsed, then prefixed with `--`.
fn long_from_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push_str("--");
    let mut prev_dash = false;
    for c in name.to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() { c } else { '-' };
        if c == '-' && prev_dash {
            continue;
        }
        prev_dash = c == '-';
        out.push(c);
    }
    out
}

/// Second and third characters of the long form (`--foo` => `-f`).
fn short_from_long(long: &str) -> Option<String> {
    let short: String = long.chars().skip(1).take(2).collect();
    (!short.is_empty()).then_some(short)
}

/// Declarative builder for [`OptionDef`].
///
/// Each field is `None` until touched, so "left unset" and "explicitly set to
/// nothing" (`no_short`, `no_cast`) stay distinguishable until `build`.
#[derive(Debug, Clone, Default)]
pub struct OptionBuilder {
    name: String,
    long: Option<String>,
    short: Option<Option<String>>,
    description: Option<String>,
    default: Option<Value>,
    cast: Option<Option<Cast>>,
    required: Option<bool>,
}

impl OptionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(Some(short.into()));
        self
    }

    /// Declare that the option has no short form.
    pub fn no_short(mut self) -> Self {
        self.short = Some(None);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn cast(mut self, cast: Cast) -> Self {
        self.cast = Some(Some(cast));
        self
    }

    /// Keep the option uncast even when a default is given.
    pub fn no_cast(mut self) -> Self {
        self.cast = Some(None);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn build(self) -> OptionDef {
        let long = self.long.unwrap_or_else(|| long_from_name(&self.name));
        let short = match self.short {
            Some(explicit) => explicit,
            None => short_from_long(&long),
        };
        let cast = match self.cast {
            Some(explicit) => explicit,
            None => self.default.as_ref().map(Cast::of),
        };

        OptionDef {
            name: self.name,
            long,
            short,
            description: self.description,
            default: self.default,
            cast,
            required: self.required.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_definition_fills_defaults() {
        let opt = OptionDef::named("field");
        assert_eq!(opt.name(), "field");
        assert_eq!(opt.long(), "--field");
        assert_eq!(opt.short(), Some("-f"));
        assert_eq!(opt.default_value(), None);
        assert_eq!(opt.cast(), None);
        assert_eq!(opt.description(), None);
        assert!(!opt.is_required());
    }

    #[test]
    fn explicit_fields_are_kept() {
        let opt = OptionDef::define("field")
            .long("--long")
            .short("-s")
            .default(10)
            .cast(Cast::Numeric)
            .description("My description")
            .required(true)
            .build();
        assert_eq!(opt.name(), "field");
        assert_eq!(opt.long(), "--long");
        assert_eq!(opt.short(), Some("-s"));
        assert_eq!(opt.default_value(), Some(&Value::Int(10)));
        assert_eq!(opt.cast(), Some(Cast::Numeric));
        assert_eq!(opt.description(), Some("My description"));
        assert!(opt.is_required());
    }

    #[test]
    fn short_derives_from_explicit_long() {
        let opt = OptionDef::define("field").long("--long").build();
        assert_eq!(opt.short(), Some("-l"));
    }

    #[test]
    fn cleared_short_stays_cleared() {
        let opt = OptionDef::define("field").no_short().long("--long").build();
        assert_eq!(opt.short(), None);
    }

    #[test]
    fn cast_is_inferred_from_default() {
        assert_eq!(
            OptionDef::define("f").default(10).build().cast(),
            Some(Cast::Numeric)
        );
        assert_eq!(
            OptionDef::define("f").default(true).build().cast(),
            Some(Cast::Boolean)
        );
        assert_eq!(
            OptionDef::define("f").default(false).build().cast(),
            Some(Cast::Boolean)
        );
        assert_eq!(
            OptionDef::define("f").default("12").build().cast(),
            Some(Cast::Text)
        );
    }

    #[test]
    fn cleared_cast_ignores_default() {
        let opt = OptionDef::define("f").default(10).no_cast().build();
        assert_eq!(opt.cast(), None);
    }

    #[test]
    fn long_is_normalised_from_name() {
        assert_eq!(OptionDef::named("dry_run").long(), "--dry-run");
        assert_eq!(OptionDef::named("Max__Depth").long(), "--max-depth");
        assert_eq!(OptionDef::named("v2").long(), "--v-");
    }

    #[test]
    fn numeric_typecast() {
        let opt = OptionDef::define("n").cast(Cast::Numeric).build();
        assert_eq!(opt.typecast(Some("12")).unwrap(), Value::Int(12));
        assert_eq!(opt.typecast(Some("12.1")).unwrap(), Value::Float(12.1));
        assert_eq!(opt.typecast(Some("1.2.3")).unwrap(), Value::Float(1.2));
        assert_eq!(opt.typecast(Some("")).unwrap(), Value::Int(0));
        assert_eq!(
            opt.typecast(Some("a")).unwrap_err(),
            ParseError::NonNumeric("--n".to_string())
        );
        assert_eq!(
            opt.typecast(None).unwrap_err(),
            ParseError::MissingValue("--n".to_string())
        );
        assert!(matches!(
            opt.typecast(Some("99999999999999999999")),
            Err(ParseError::NonNumeric(_))
        ));
    }

    #[test]
    fn text_typecast_passes_through() {
        let opt = OptionDef::named("foo");
        assert_eq!(opt.typecast(Some("bar")).unwrap(), Value::from("bar"));
        assert_eq!(opt.typecast(None).unwrap(), Value::Bool(true));
    }
}
