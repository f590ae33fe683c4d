use indexmap::IndexMap;
use std::collections::{HashMap, VecDeque};

use crate::arguments::ParsedArguments;
use crate::error::{ParseError, ParseResult};
use crate::option::OptionDef;
use crate::token::{Token, is_switch};
use crate::value::Value;

/// An option resolved from a switch name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    pub option: &'a OptionDef,
    /// Matched through the `--no-<long>` form of a boolean option.
    pub negated: bool,
}

/// Binds argument vectors against a fixed option schema.
///
/// When two options share a long or short form, the one declared last owns
/// it. An option that loses its long form takes no further part in parsing.
#[derive(Debug, Clone, Default)]
pub struct OptionParser {
    options: Vec<OptionDef>,
    longs: IndexMap<String, usize>,
    shorts: HashMap<String, usize>,
}

impl OptionParser {
    pub fn new(options: impl IntoIterator<Item = OptionDef>) -> Self {
        let options: Vec<OptionDef> = options.into_iter().collect();
        let mut longs = IndexMap::new();
        let mut shorts = HashMap::new();

        for (idx, option) in options.iter().enumerate() {
            longs.insert(option.long().to_string(), idx);
            if let Some(short) = option.short() {
                shorts.insert(short.to_string(), idx);
            }
        }

        Self {
            options,
            longs,
            shorts,
        }
    }

    /// Options that own a long form, in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &OptionDef> {
        self.longs.values().map(|&idx| &self.options[idx])
    }

    /// Default values keyed by option name. Options without a default are left out.
    pub fn defaults(&self) -> IndexMap<String, Value> {
        self.options()
            .filter_map(|o| {
                o.default_value()
                    .map(|v| (o.name().to_string(), v.clone()))
            })
            .collect()
    }

    /// Resolve a switch to its option.
    ///
    /// Tries the long forms, then the short forms, then `--no-<rest>` as the
    /// negation of a boolean option whose long form is exactly `--<rest>`.
    pub fn option_for(&self, switch: &str) -> Option<Resolved<'_>> {
        if let Some(&idx) = self.longs.get(switch).or_else(|| self.shorts.get(switch)) {
            return Some(Resolved {
                option: &self.options[idx],
                negated: false,
            });
        }

        let rest = switch.strip_prefix("--no-")?;
        if rest.is_empty() || rest.chars().any(char::is_whitespace) {
            return None;
        }
        let long = format!("--{rest}");
        let &idx = self.longs.get(&long)?;
        let option = &self.options[idx];
        (option.is_boolean() && option.long() == long).then_some(Resolved {
            option,
            negated: true,
        })
    }

    fn is_known_switch(&self, arg: &str) -> bool {
        self.option_for(arg).is_some()
    }

    /// Parse `args` into a [`ParsedArguments`].
    ///
    /// Leading tokens up to the first switch-shaped token are collected as
    /// leading non-opts. Switches are then consumed until a token that is not
    /// switch-shaped appears; that token and everything after it become the
    /// trailing non-opts, unscanned.
    pub fn parse<I, S>(&self, args: I) -> ParseResult<ParsedArguments>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args: VecDeque<String> = args.into_iter().map(Into::into).collect();
        let mut values = self.defaults();

        let mut leading = Vec::new();
        while let Some(arg) = args.pop_front() {
            if is_switch(&arg) {
                args.push_front(arg);
                break;
            }
            leading.push(arg);
        }

        while let Some(arg) = args.pop_front() {
            if !is_switch(&arg) {
                args.push_front(arg);
                break;
            }

            let switch = match Token::classify(&arg) {
                Token::ShortJoined(letters) => {
                    for c in letters.chars().rev() {
                        args.push_front(format!("-{c}"));
                    }
                    continue;
                }
                Token::LongWithValue { switch, value }
                | Token::ShortWithNumeric { switch, value } => {
                    args.push_front(value.to_string());
                    switch
                }
                Token::LongBare(switch) | Token::ShortBare(switch) => switch,
                Token::Literal(_) | Token::Malformed(_) => {
                    return Err(ParseError::InvalidSwitch(arg));
                }
            };

            let Some(Resolved { option, negated }) = self.option_for(switch) else {
                return Err(ParseError::InvalidSwitch(arg));
            };

            // Booleans never take a value, required or not.
            let value = if option.is_boolean() {
                Value::Bool(!negated)
            } else if option.is_required() {
                match args.pop_front() {
                    Some(next) if !self.is_known_switch(&next) => Value::Str(next),
                    _ => return Err(ParseError::MissingValue(arg)),
                }
            } else {
                let takes_next = args.front().is_some_and(|next| !self.is_known_switch(next));
                let raw = if takes_next { args.pop_front() } else { None };
                option.typecast(raw.as_deref())?
            };

            values.insert(option.name().to_string(), value);
        }

        let trailing: Vec<String> = args.into();
        self.ensure_required_options_are_set(&values)?;

        Ok(ParsedArguments::new(values, leading, trailing))
    }

    fn ensure_required_options_are_set(&self, values: &IndexMap<String, Value>) -> ParseResult<()> {
        let missing: Vec<String> = self
            .options()
            .filter(|o| o.is_required() && !values.contains_key(o.name()))
            .map(|o| o.long().to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ParseError::MissingRequiredOption(missing))
        }
    }
}
