//! Usage-text rendering, built only on the [`ParserMetadata`] snapshot.
//!
//! The renderer deliberately consumes the same read-only contract an
//! out-of-process formatter would, rather than reaching into parser
//! internals.

use crate::metadata::{ArgMetadata, ParserMetadata};
use crate::parser::ArgParser;

impl ArgParser {
    /// Render the help text for this parser's declarations.
    pub fn help_message(&self) -> String {
        render_help(&self.metadata())
    }
}

/// Render usage text from a parser snapshot.
pub fn render_help(meta: &ParserMetadata) -> String {
    let mut out = String::new();
    out.push_str(&meta.program);
    out.push('\n');
    if !meta.description.is_empty() {
        out.push_str(&meta.description);
        out.push('\n');
    }
    out.push('\n');
    for arg in &meta.args {
        out.push_str(&arg_line(arg));
        out.push('\n');
    }
    out
}

fn arg_line(arg: &ArgMetadata) -> String {
    let mut out = String::from("  ");
    match arg.short {
        Some(ch) => out.push_str(&format!("-{ch}, ")),
        None => out.push_str("    "),
    }
    out.push_str(&format!("--{}", arg.name));
    if let Some(placeholder) = arg.kind.placeholder() {
        out.push_str(&format!("=<{placeholder}>"));
    }
    if !arg.help.is_empty() {
        out.push_str(&format!(", {}", arg.help));
    }
    if arg.multi_value {
        out.push_str(" [repeated");
        if arg.min_count > 0 {
            out.push_str(&format!(", min args = {}", arg.min_count));
        }
        out.push(']');
    }
    if let Some(default) = &arg.default_value {
        out.push_str(&format!(" [default = {default}]"));
    }
    if arg.required {
        out.push_str(" [required]");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_program_description_and_arguments() {
        let mut parser = ArgParser::new("accumulate");
        parser
            .add_int(Some('n'), "count", "How many times")
            .multi_value(2)
            .default_value(1);
        parser.add_string(None, "label", "Output label").required();
        parser.add_flag(Some('q'), "quiet", "Suppress output");
        parser.add_help('h', "help", "Accumulates numbers");

        let text = parser.help_message();
        assert!(text.starts_with("accumulate\nAccumulates numbers\n\n"));
        assert!(
            text.contains("  -n, --count=<int>, How many times [repeated, min args = 2] [default = 1]")
        );
        assert!(text.contains("      --label=<string>, Output label [required]"));
        assert!(text.contains("  -q, --quiet, Suppress output"));
        assert!(text.contains("  -h, --help, Display this help and exit"));
    }
}
