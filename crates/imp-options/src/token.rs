//! Token shapes recognised by the option parser.
//!
//! | Shape | Example | Token |
//! |---|---|---|
//! | long bare | `--dry-run` | [`Token::LongBare`] |
//! | long (or short) with value | `--out=a.txt`, `-o=a.txt` | [`Token::LongWithValue`] |
//! | short bare | `-v` | [`Token::ShortBare`] |
//! | short with numeric suffix | `-n12`, `-n1.5` | [`Token::ShortWithNumeric`] |
//! | joined shorts | `-abc` | [`Token::ShortJoined`] |
//!
//! Joined shorts are checked first, then the value-carrying forms, then the
//! bare forms.

/// Whether `arg` looks like a switch (starts with `-`).
pub fn is_switch(arg: &str) -> bool {
    arg.starts_with('-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Not switch-shaped.
    Literal(&'a str),
    LongBare(&'a str),
    /// `--switch=value` or `-x=value`. The value may be empty.
    LongWithValue { switch: &'a str, value: &'a str },
    ShortBare(&'a str),
    /// `-x<digits>[.digits]`.
    ShortWithNumeric { switch: &'a str, value: &'a str },
    /// The letters after the dash of `-abc`.
    ShortJoined(&'a str),
    /// Starts with `-` but matches none of the shapes above (`-`, `--`, `-1`).
    Malformed(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(arg: &'a str) -> Self {
        if !is_switch(arg) {
            return Self::Literal(arg);
        }

        let body = &arg[1..];
        if body.len() >= 2 && body.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Self::ShortJoined(body);
        }

        if let Some((switch, value)) = arg.split_once('=') {
            if is_long_switch(switch) || is_short_switch(switch) {
                return Self::LongWithValue { switch, value };
            }
        }

        if let (Some(switch), Some(value)) = (arg.get(..2), arg.get(2..)) {
            if is_short_switch(switch) && is_numeric_suffix(value) {
                return Self::ShortWithNumeric { switch, value };
            }
        }

        if is_long_switch(arg) {
            Self::LongBare(arg)
        } else if is_short_switch(arg) {
            Self::ShortBare(arg)
        } else {
            Self::Malformed(arg)
        }
    }

    /// Whether the token is switch-shaped at all.
    pub fn is_switch(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// `--` followed by a word character, then word characters, `-` or `+`.
fn is_long_switch(s: &str) -> bool {
    let Some(rest) = s.strip_prefix("--") else {
        return false;
    };
    let bytes = rest.as_bytes();
    match bytes.split_first() {
        Some((first, tail)) => {
            is_word(*first) && tail.iter().all(|&b| is_word(b) || b == b'-' || b == b'+')
        }
        None => false,
    }
}

/// `-` followed by exactly one ASCII letter.
fn is_short_switch(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 2 && bytes[0] == b'-' && bytes[1].is_ascii_alphabetic()
}

/// `\d+` or `\d*\.\d+`.
fn is_numeric_suffix(s: &str) -> bool {
    let (int_part, frac) = match s.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (s, None),
    };
    let digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    match frac {
        None => !int_part.is_empty() && digits(int_part),
        Some(frac) => digits(int_part) && !frac.is_empty() && digits(frac),
    }
}

#[cfg(test)]
mod tests {
    use super::Token;

    #[test]
    fn classifies_each_shape() {
        assert_eq!(Token::classify("file.txt"), Token::Literal("file.txt"));
        assert_eq!(Token::classify("--foo"), Token::LongBare("--foo"));
        assert_eq!(Token::classify("--dry-run"), Token::LongBare("--dry-run"));
        assert_eq!(Token::classify("-f"), Token::ShortBare("-f"));
        assert_eq!(Token::classify("-fbq"), Token::ShortJoined("fbq"));
        assert_eq!(
            Token::classify("--foo=bar baz"),
            Token::LongWithValue {
                switch: "--foo",
                value: "bar baz"
            }
        );
        assert_eq!(
            Token::classify("--foo="),
            Token::LongWithValue {
                switch: "--foo",
                value: ""
            }
        );
        assert_eq!(
            Token::classify("-o=out"),
            Token::LongWithValue {
                switch: "-o",
                value: "out"
            }
        );
        assert_eq!(
            Token::classify("-n12"),
            Token::ShortWithNumeric {
                switch: "-n",
                value: "12"
            }
        );
        assert_eq!(
            Token::classify("-n.5"),
            Token::ShortWithNumeric {
                switch: "-n",
                value: ".5"
            }
        );
    }

    #[test]
    fn joined_shorts_win_over_other_shapes() {
        assert_eq!(Token::classify("-ab"), Token::ShortJoined("ab"));
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        assert_eq!(
            Token::classify("--define=a=b"),
            Token::LongWithValue {
                switch: "--define",
                value: "a=b"
            }
        );
    }

    #[test]
    fn odd_switches_are_malformed() {
        assert_eq!(Token::classify("-"), Token::Malformed("-"));
        assert_eq!(Token::classify("--"), Token::Malformed("--"));
        assert_eq!(Token::classify("-1"), Token::Malformed("-1"));
        assert_eq!(Token::classify("-n1."), Token::Malformed("-n1."));
        assert_eq!(Token::classify("--=x"), Token::Malformed("--=x"));
    }
}
