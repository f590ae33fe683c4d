//! Typed command-line option declarations and a flat argv parser.
//!
//! A command declares its switches once as a list of [`OptionDef`]s. Each
//! invocation feeds an argument vector through a fresh [`OptionParser`], which
//! binds switch values by option name and keeps the non-switch tokens found
//! before and after the switches.
//!
//! ```
//! use imp_options::{Cast, OptionDef, OptionParser, Value};
//!
//! let parser = OptionParser::new([
//!     OptionDef::define("number").cast(Cast::Numeric).build(),
//!     OptionDef::define("verbose").cast(Cast::Boolean).build(),
//! ]);
//!
//! let parsed = parser.parse(["report", "-v", "--number", "12", "out.txt"]).unwrap();
//! assert_eq!(parsed.get("number"), Some(&Value::Int(12)));
//! assert_eq!(parsed.get("verbose"), Some(&Value::Bool(true)));
//! assert_eq!(parsed.leading_non_opts(), ["report"]);
//! assert_eq!(parsed.trailing_non_opts(), ["out.txt"]);
//! ```

mod arguments;
mod error;
mod option;
mod parser;
pub mod token;
mod value;

pub use arguments::ParsedArguments;
pub use error::{ParseError, ParseResult};
pub use option::{OptionBuilder, OptionDef};
pub use parser::{OptionParser, Resolved};
pub use token::{Token, is_switch};
pub use value::{Cast, Value};
