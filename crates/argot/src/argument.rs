use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};
use crate::store::Store;

/// The three built-in value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgKind {
    String,
    Int,
    Flag,
}

impl Default for ArgKind {
    fn default() -> Self {
        Self::Flag
    }
}

impl ArgKind {
    /// Placeholder used in rendered help, e.g. `--count=<int>`.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::String => Some("string"),
            Self::Int => Some("int"),
            Self::Flag => None,
        }
    }
}

/// A single accepted or defaulted value, typed per [`ArgKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Flag(bool),
    Int(i64),
    String(String),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// One declared option or positional slot, owned by the registry.
///
/// Declaration-time fields are fixed once the builder handle is dropped;
/// the per-parse fields are cleared by [`Argument::reset`] at the start of
/// every parse so repeated parses never leak state.
#[derive(Debug, Default)]
pub(crate) struct Argument {
    pub(crate) kind: ArgKind,
    pub(crate) name: String,
    pub(crate) short: Option<char>,
    pub(crate) help: String,
    pub(crate) positional: bool,
    pub(crate) multi: bool,
    pub(crate) min_count: usize,
    pub(crate) default: Option<ArgValue>,
    pub(crate) required: bool,

    // Per-parse state.
    pub(crate) provided: bool,
    pub(crate) values: Vec<ArgValue>,
    pub(crate) flag: bool,
    pub(crate) stores: Vec<Store>,
}

impl Argument {
    pub(crate) fn new(kind: ArgKind, short: Option<char>, name: &str, help: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            short,
            help: help.to_string(),
            ..Self::default()
        }
    }

    /// The flag value this argument rests at when unset.
    pub(crate) fn flag_default(&self) -> bool {
        matches!(self.default, Some(ArgValue::Flag(true)))
    }

    /// Clear all per-parse state, including registered output slots.
    pub(crate) fn reset(&mut self) {
        self.provided = false;
        self.values.clear();
        self.flag = self.flag_default();
        for store in &self.stores {
            store.reset(self.default.as_ref());
        }
    }

    /// Parse a raw token into a value of this argument's kind.
    pub(crate) fn value_from(&self, raw: &str) -> ParseResult<ArgValue> {
        match self.kind {
            ArgKind::String => Ok(ArgValue::String(raw.to_string())),
            ArgKind::Int => raw
                .parse::<i64>()
                .map(ArgValue::Int)
                .map_err(|_| ParseError::InvalidInt {
                    name: self.name.clone(),
                    value: raw.to_string(),
                }),
            // Flags never consume a raw value token.
            ArgKind::Flag => Ok(ArgValue::Flag(true)),
        }
    }

    /// Accept one value: mark provided, accumulate, mirror into slots.
    ///
    /// A non-multi argument keeps at most one value; a repeated occurrence
    /// replaces the earlier one.
    pub(crate) fn accept(&mut self, value: ArgValue) {
        if !self.multi {
            self.values.clear();
        }
        self.provided = true;
        for store in &self.stores {
            store.accept(&value);
        }
        self.values.push(value);
    }

    /// Mark a flag as present.
    pub(crate) fn raise(&mut self) {
        self.provided = true;
        self.flag = true;
        for store in &self.stores {
            store.accept(&ArgValue::Flag(true));
        }
    }

    /// Populate from the declared default after the token loop.
    pub(crate) fn apply_default(&mut self) {
        let Some(default) = self.default.clone() else {
            return;
        };
        self.provided = true;
        match default {
            ArgValue::Flag(b) => {
                self.flag = b;
                for store in &self.stores {
                    store.accept(&ArgValue::Flag(b));
                }
            }
            value => {
                for store in &self.stores {
                    store.accept(&value);
                }
                self.values.push(value);
            }
        }
    }
}
