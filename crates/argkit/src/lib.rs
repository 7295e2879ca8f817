//! Option registry, argument parsing and column-wrapped help rendering.
//!
//! - [`ArgParser`] holds declared options and positionals, parses an argument
//!   vector and answers value lookups.
//! - [`TextLayout`] renders one "label + wrapped description" help entry.
//!
//! Parsing never exits the process. [`ArgParser::parse`] returns a
//! [`ParseOutcome`] and the caller decides whether to print and stop:
//!
//! ```no_run
//! use argkit::{ArgOption, ArgParser};
//!
//! let mut parser = ArgParser::new("tool");
//! parser.add_help_option().unwrap();
//! parser
//!     .add_option(ArgOption::new(["-f", "--file"], "Input file").value_name("file"))
//!     .unwrap();
//!
//! let outcome = parser.parse_and_report_stdio().unwrap();
//! if let Some(code) = outcome.exit_code() {
//!     std::process::exit(code);
//! }
//! let file = parser.value("--file");
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod option;
pub mod parser;

pub use config::{LayoutConfig, ParserConfig};
pub use error::{ArgError, Result};
pub use layout::TextLayout;
pub use option::{ArgOption, OptionKey};
pub use parser::{ArgParser, ParseOutcome, Positional, process_args};
