//! Declarative command-line argument parsing.
//!
//! Callers register named and positional arguments (string, integer,
//! boolean flag) on an [`ArgParser`], attach modifiers through the typed
//! builder handle each declaration returns (defaults, required,
//! multi-value minimum counts, bound output [`Slot`]s), then feed the
//! parser a raw token list. The result is either a fully validated,
//! populated argument set or a [`ParseError`] naming the first failure.
//!
//! Supported token shapes: long options (`--name`, `--name=value`), short
//! clusters (`-abc`, `-xvalue`, `-x=value`, `-x value`), positionals in
//! declaration order, and a bare `--` after which every remaining token is
//! captured as positional.
//!
//! This crate is intentionally small: no subcommands, no argument groups,
//! no custom value types.
//!
//! # Example
//!
//! ```
//! use argot::ArgParser;
//!
//! let mut parser = ArgParser::new("frobnicate");
//! parser
//!     .add_string(Some('o'), "output", "Output path")
//!     .default_value("out.txt");
//! parser.add_flag(Some('v'), "verbose", "Chatty logging");
//! parser.add_int(None, "jobs", "Worker count").default_value(1);
//!
//! parser.parse(&["frobnicate", "-v", "--jobs=4"]).unwrap();
//! assert!(parser.get_flag("verbose"));
//! assert_eq!(parser.get_int("jobs"), 4);
//! assert_eq!(parser.get_string("output"), "out.txt");
//! ```

mod argument;
mod error;
mod help;
mod metadata;
mod parser;
mod store;

pub use argument::{ArgKind, ArgValue};
pub use error::{ParseError, ParseResult};
pub use help::render_help;
pub use metadata::{ArgMetadata, ParserMetadata};
pub use parser::{ArgParser, FlagArg, IntArg, StringArg};
pub use store::{Slot, slot};
