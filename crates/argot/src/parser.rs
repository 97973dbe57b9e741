//! The argument registry and the token resolver.
//!
//! Declarations accumulate into one owning `Vec<Argument>`; the long-name,
//! short-name, and positional indices hold arena indices into that list,
//! never references. Parsing walks the token list left to right with a
//! single cursor, then runs the defaulting/validation pass.

use indexmap::IndexMap;

use crate::argument::{ArgKind, ArgValue, Argument};
use crate::error::{ParseError, ParseResult};
use crate::metadata::{ArgMetadata, ParserMetadata};
use crate::store::{Slot, Store};

/// Declarative argument registry and parser.
///
/// Built once per configuration via the `add_*` declaration methods, then
/// driven any number of times via [`parse`](Self::parse) or
/// [`parse_tokens`](Self::parse_tokens). Every parse begins with a full
/// state reset, so repeated calls never leak values into each other.
pub struct ArgParser {
    program: String,
    description: String,
    args: Vec<Argument>,
    by_long: IndexMap<String, usize>,
    by_short: IndexMap<char, usize>,
    positionals: Vec<usize>,
    help_index: Option<usize>,
    help_requested: bool,
}

impl ArgParser {
    /// Create an empty registry. The program name is only used when
    /// rendering help.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            description: String::new(),
            args: Vec::new(),
            by_long: IndexMap::new(),
            by_short: IndexMap::new(),
            positionals: Vec::new(),
            help_index: None,
            help_requested: false,
        }
    }

    fn register(&mut self, kind: ArgKind, short: Option<char>, name: &str, help: &str) -> usize {
        let index = self.args.len();
        if self.by_long.insert(name.to_string(), index).is_some() {
            panic!("duplicate argument name '--{name}'");
        }
        if let Some(ch) = short {
            if self.by_short.insert(ch, index).is_some() {
                panic!("duplicate short name '-{ch}'");
            }
        }
        self.args.push(Argument::new(kind, short, name, help));
        index
    }

    /// Declare a string-valued argument.
    ///
    /// # Panics
    ///
    /// Panics if `name` or `short` is already declared.
    pub fn add_string(&mut self, short: Option<char>, name: &str, help: &str) -> StringArg<'_> {
        let index = self.register(ArgKind::String, short, name, help);
        StringArg {
            parser: self,
            index,
        }
    }

    /// Declare an integer-valued argument.
    ///
    /// # Panics
    ///
    /// Panics if `name` or `short` is already declared.
    pub fn add_int(&mut self, short: Option<char>, name: &str, help: &str) -> IntArg<'_> {
        let index = self.register(ArgKind::Int, short, name, help);
        IntArg {
            parser: self,
            index,
        }
    }

    /// Declare a boolean flag.
    ///
    /// # Panics
    ///
    /// Panics if `name` or `short` is already declared.
    pub fn add_flag(&mut self, short: Option<char>, name: &str, help: &str) -> FlagArg<'_> {
        let index = self.register(ArgKind::Flag, short, name, help);
        FlagArg {
            parser: self,
            index,
        }
    }

    /// Declare the designated help flag and set the help blurb.
    ///
    /// When this flag appears anywhere among the parsed tokens (outside
    /// trailing positional capture), the parse reports success without
    /// running required/min-count validation and
    /// [`help_requested`](Self::help_requested) turns true.
    ///
    /// # Panics
    ///
    /// Panics if `name` or `short` is already declared.
    pub fn add_help(&mut self, short: char, name: &str, description: &str) -> &mut Self {
        self.description = description.to_string();
        let index = self.register(ArgKind::Flag, Some(short), name, "Display this help and exit");
        self.help_index = Some(index);
        self
    }

    /// Parse a raw invocation. The first token is taken to be the program
    /// name and skipped.
    pub fn parse<S: AsRef<str>>(&mut self, argv: &[S]) -> ParseResult<()> {
        match argv {
            [] => self.parse_tokens::<S>(&[]),
            [_, rest @ ..] => self.parse_tokens(rest),
        }
    }

    /// Parse a token list (no program-name token).
    ///
    /// On failure the first malformed token is reported; accumulated
    /// values are unspecified and must not be read. A raised help flag
    /// wins over both token and validation failures.
    pub fn parse_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) -> ParseResult<()> {
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
        self.reset();
        tracing::debug!(tokens = tokens.len(), "parsing token list");

        let mut first_err: Option<ParseError> = None;
        let mut pos_cursor = 0usize;
        let mut trailing = false;
        let mut i = 0usize;

        while i < tokens.len() {
            let token = tokens[i];

            if trailing {
                if let Err(err) = self.accept_positional(&mut pos_cursor, token) {
                    note(&mut first_err, err);
                }
                i += 1;
                continue;
            }

            if token == "--" {
                tracing::debug!("entering trailing positional capture");
                trailing = true;
                i += 1;
                continue;
            }

            if token == "-" {
                note(&mut first_err, ParseError::BareDash);
                i += 1;
                continue;
            }

            if let Some(body) = token.strip_prefix("--") {
                i += self.take_long(body, tokens.get(i + 1).copied(), &mut first_err);
                continue;
            }

            if let Some(body) = token.strip_prefix('-') {
                i += self.take_cluster(body, tokens.get(i + 1).copied(), &mut first_err);
                continue;
            }

            if let Err(err) = self.accept_positional(&mut pos_cursor, token) {
                note(&mut first_err, err);
            }
            i += 1;
        }

        if self.help_requested {
            return Ok(());
        }
        if let Some(err) = first_err {
            tracing::debug!(error = %err, "parse failed");
            return Err(err);
        }
        let outcome = self.finish();
        if let Err(err) = &outcome {
            tracing::debug!(error = %err, "validation failed");
        }
        outcome
    }

    /// Resolve a `--name` / `--name=value` token. Returns how many tokens
    /// were consumed.
    fn take_long(
        &mut self,
        body: &str,
        next: Option<&str>,
        first_err: &mut Option<ParseError>,
    ) -> usize {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let Some(&index) = self.by_long.get(name) else {
            note(first_err, ParseError::UnknownLong(name.to_string()));
            return 1;
        };

        if self.args[index].kind == ArgKind::Flag {
            if inline.is_some() {
                note(first_err, ParseError::FlagTakesNoValue(name.to_string()));
            } else {
                self.raise_flag(index);
            }
            return 1;
        }

        let (raw, consumed) = match inline {
            Some(value) => (value, 1),
            None => match next {
                Some(value) => (value, 2),
                None => {
                    note(first_err, ParseError::MissingValue(format!("--{name}")));
                    return 1;
                }
            },
        };
        match self.args[index].value_from(raw) {
            Ok(value) => self.args[index].accept(value),
            Err(err) => note(first_err, err),
        }
        consumed
    }

    /// Resolve a short cluster (the token body after the leading `-`).
    /// Returns how many tokens were consumed.
    ///
    /// Flags may be stacked; the first value-taking option ends the
    /// cluster, taking its value from an inline `=`, the remaining
    /// characters, or the next token, in that order.
    fn take_cluster(
        &mut self,
        body: &str,
        next: Option<&str>,
        first_err: &mut Option<ParseError>,
    ) -> usize {
        let mut consumed = 1;
        for (pos, ch) in body.char_indices() {
            let Some(&index) = self.by_short.get(&ch) else {
                note(first_err, ParseError::UnknownShort(ch));
                continue;
            };
            if self.args[index].kind == ArgKind::Flag {
                self.raise_flag(index);
                continue;
            }

            let rest = &body[pos + ch.len_utf8()..];
            let raw = if let Some(stripped) = rest.strip_prefix('=') {
                stripped
            } else if !rest.is_empty() {
                rest
            } else {
                match next {
                    Some(value) => {
                        consumed = 2;
                        value
                    }
                    None => {
                        note(first_err, ParseError::MissingValue(format!("-{ch}")));
                        return consumed;
                    }
                }
            };
            match self.args[index].value_from(raw) {
                Ok(value) => self.args[index].accept(value),
                Err(err) => note(first_err, err),
            }
            break;
        }
        consumed
    }

    /// Dispatch one positional token to the next unfilled slot.
    ///
    /// A single-valued slot hands over after one value; a multi-value slot
    /// that is not last hands over once its minimum is met; the last
    /// multi-value slot is greedy and never advances.
    fn accept_positional(&mut self, cursor: &mut usize, token: &str) -> ParseResult<()> {
        let Some(&index) = self.positionals.get(*cursor) else {
            return Err(ParseError::UnexpectedPositional(token.to_string()));
        };
        let value = self.args[index].value_from(token)?;
        self.args[index].accept(value);

        let arg = &self.args[index];
        let last = *cursor + 1 == self.positionals.len();
        if !arg.multi || (!last && arg.values.len() >= arg.min_count) {
            *cursor += 1;
        }
        Ok(())
    }

    fn raise_flag(&mut self, index: usize) {
        self.args[index].raise();
        if self.help_index == Some(index) {
            self.help_requested = true;
        }
    }

    /// Defaulting and required/min-count validation after the token loop.
    fn finish(&mut self) -> ParseResult<()> {
        for arg in &mut self.args {
            if !arg.provided {
                if arg.default.is_some() {
                    arg.apply_default();
                    continue;
                }
                if arg.multi && arg.min_count == 0 {
                    continue;
                }
                if arg.required {
                    return Err(ParseError::MissingRequired(arg.name.clone()));
                }
                if arg.multi && arg.min_count > 0 {
                    return Err(ParseError::TooFewValues {
                        name: arg.name.clone(),
                        min: arg.min_count,
                        got: 0,
                    });
                }
            } else if arg.multi && arg.values.len() < arg.min_count {
                return Err(ParseError::TooFewValues {
                    name: arg.name.clone(),
                    min: arg.min_count,
                    got: arg.values.len(),
                });
            }
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.help_requested = false;
        for arg in &mut self.args {
            arg.reset();
        }
    }

    fn lookup(&self, name: &str) -> Option<&Argument> {
        self.by_long.get(name).map(|&index| &self.args[index])
    }

    fn value_at(&self, name: &str, index: usize) -> Option<&ArgValue> {
        self.lookup(name).and_then(|arg| arg.values.get(index))
    }

    /// First accepted string value, or `""` when absent.
    pub fn get_string(&self, name: &str) -> &str {
        self.get_string_at(name, 0)
    }

    /// String value at `index`, or `""` when absent or out of range.
    pub fn get_string_at(&self, name: &str, index: usize) -> &str {
        self.value_at(name, index)
            .and_then(ArgValue::as_str)
            .unwrap_or_default()
    }

    /// First accepted integer value, or `0` when absent.
    pub fn get_int(&self, name: &str) -> i64 {
        self.get_int_at(name, 0)
    }

    /// Integer value at `index`, or `0` when absent or out of range.
    pub fn get_int_at(&self, name: &str, index: usize) -> i64 {
        self.value_at(name, index)
            .and_then(ArgValue::as_int)
            .unwrap_or_default()
    }

    /// Current flag state, or `false` for unknown names.
    pub fn get_flag(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|arg| arg.flag)
    }

    /// Whether the argument was provided (or defaulted) in the last parse.
    pub fn provided(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|arg| arg.provided)
    }

    /// Number of values accumulated for the argument in the last parse.
    pub fn value_count(&self, name: &str) -> usize {
        self.lookup(name).map(|arg| arg.values.len()).unwrap_or(0)
    }

    /// Whether the designated help flag appeared in the last parse.
    pub fn help_requested(&self) -> bool {
        self.help_requested
    }

    /// The program name given at construction.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Snapshot of the full ordered argument list, sufficient for an
    /// external formatter to render usage text.
    pub fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            program: self.program.clone(),
            description: self.description.clone(),
            args: self
                .args
                .iter()
                .map(|arg| ArgMetadata {
                    name: arg.name.clone(),
                    short: arg.short,
                    help: arg.help.clone(),
                    kind: arg.kind,
                    positional: arg.positional,
                    multi_value: arg.multi,
                    min_count: arg.min_count,
                    default_value: arg.default.clone(),
                    required: arg.required,
                })
                .collect(),
        }
    }
}

fn note(slot: &mut Option<ParseError>, err: ParseError) {
    if slot.is_none() {
        *slot = Some(err);
    }
}

/// Builder handle for a string argument.
///
/// Returned by [`ArgParser::add_string`]; modifiers chain and apply to the
/// argument the handle was created for.
pub struct StringArg<'p> {
    parser: &'p mut ArgParser,
    index: usize,
}

impl StringArg<'_> {
    fn arg(&mut self) -> &mut Argument {
        &mut self.parser.args[self.index]
    }

    /// Value applied when the argument is absent from the token list.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.arg().default = Some(ArgValue::String(value.into()));
        self
    }

    /// Accept repeated occurrences; `min_count` values are required once
    /// the argument has no default.
    pub fn multi_value(mut self, min_count: usize) -> Self {
        let arg = self.arg();
        arg.multi = true;
        arg.min_count = min_count;
        self
    }

    /// Fill this argument from bare tokens, in declaration order.
    pub fn positional(mut self) -> Self {
        self.arg().positional = true;
        self.parser.positionals.push(self.index);
        self
    }

    /// Fail the parse when the argument is absent and has no default.
    pub fn required(mut self) -> Self {
        self.arg().required = true;
        self
    }

    /// Bind a scalar output slot. The slot is initialized immediately to
    /// the default value if one is set, else to `""`.
    pub fn store(mut self, slot: &Slot<String>) -> Self {
        let arg = self.arg();
        *slot.borrow_mut() = arg
            .default
            .as_ref()
            .and_then(ArgValue::as_str)
            .unwrap_or_default()
            .to_string();
        arg.stores.push(Store::Str(slot.clone()));
        self
    }

    /// Bind a sequence output slot; accepted values are appended.
    pub fn store_all(mut self, slot: &Slot<Vec<String>>) -> Self {
        self.arg().stores.push(Store::StrSeq(slot.clone()));
        self
    }
}

/// Builder handle for an integer argument.
pub struct IntArg<'p> {
    parser: &'p mut ArgParser,
    index: usize,
}

impl IntArg<'_> {
    fn arg(&mut self) -> &mut Argument {
        &mut self.parser.args[self.index]
    }

    /// Value applied when the argument is absent from the token list.
    pub fn default_value(mut self, value: i64) -> Self {
        self.arg().default = Some(ArgValue::Int(value));
        self
    }

    /// Accept repeated occurrences; `min_count` values are required once
    /// the argument has no default.
    pub fn multi_value(mut self, min_count: usize) -> Self {
        let arg = self.arg();
        arg.multi = true;
        arg.min_count = min_count;
        self
    }

    /// Fill this argument from bare tokens, in declaration order.
    pub fn positional(mut self) -> Self {
        self.arg().positional = true;
        self.parser.positionals.push(self.index);
        self
    }

    /// Fail the parse when the argument is absent and has no default.
    pub fn required(mut self) -> Self {
        self.arg().required = true;
        self
    }

    /// Bind a scalar output slot. The slot is initialized immediately to
    /// the default value if one is set, else to `0`.
    pub fn store(mut self, slot: &Slot<i64>) -> Self {
        let arg = self.arg();
        *slot.borrow_mut() = arg.default.as_ref().and_then(ArgValue::as_int).unwrap_or(0);
        arg.stores.push(Store::Int(slot.clone()));
        self
    }

    /// Bind a sequence output slot; accepted values are appended.
    pub fn store_all(mut self, slot: &Slot<Vec<i64>>) -> Self {
        self.arg().stores.push(Store::IntSeq(slot.clone()));
        self
    }
}

/// Builder handle for a boolean flag.
///
/// Flags carry a single boolean, so multi-value and positional modifiers
/// are deliberately not offered here.
pub struct FlagArg<'p> {
    parser: &'p mut ArgParser,
    index: usize,
}

impl FlagArg<'_> {
    fn arg(&mut self) -> &mut Argument {
        &mut self.parser.args[self.index]
    }

    /// Resting state when the flag is absent; absent flags default to
    /// `false` otherwise. Bound slots are updated immediately.
    pub fn default_value(mut self, value: bool) -> Self {
        let arg = self.arg();
        arg.default = Some(ArgValue::Flag(value));
        arg.flag = value;
        for store in &arg.stores {
            store.accept(&ArgValue::Flag(value));
        }
        self
    }

    /// Fail the parse when the flag is absent and has no default.
    pub fn required(mut self) -> Self {
        self.arg().required = true;
        self
    }

    /// Bind a boolean output slot, initialized to the flag's resting
    /// state.
    pub fn store(mut self, slot: &Slot<bool>) -> Self {
        let arg = self.arg();
        *slot.borrow_mut() = arg.flag_default();
        arg.stores.push(Store::Flag(slot.clone()));
        self
    }
}
