//! Demo binary for the `argot` parser: accumulates integers from the
//! command line. This is the thin program-bootstrapping wrapper around the
//! library core — it reads `argv`, drives one parse, and maps the outcome
//! to output and an exit code.

use anyhow::{Result, bail};
use argot::{ArgParser, Slot, slot};
use tracing_subscriber::{EnvFilter, fmt};

fn build_parser(scale: &Slot<i64>) -> ArgParser {
    let mut parser = ArgParser::new("argot-demo");
    parser
        .add_int(None, "values", "Integers to accumulate")
        .positional()
        .multi_value(1);
    parser.add_flag(Some('p'), "product", "Multiply instead of adding");
    parser
        .add_int(Some('s'), "scale", "Scale the final result")
        .default_value(1)
        .store(scale);
    parser
        .add_string(Some('l'), "label", "Label for the output line")
        .default_value("result");
    parser.add_help('h', "help", "Accumulate integers from the command line");
    parser
}

fn main() -> Result<()> {
    init_tracing();

    let argv: Vec<String> = std::env::args().collect();
    let scale = slot::<i64>();
    let mut parser = build_parser(&scale);

    if let Err(err) = parser.parse(&argv) {
        bail!("{err} (see --help)");
    }
    if parser.help_requested() {
        print!("{}", parser.help_message());
        return Ok(());
    }

    let count = parser.value_count("values");
    tracing::debug!(count, "accumulating values");
    let values = (0..count).map(|i| parser.get_int_at("values", i));
    let accumulated: i64 = if parser.get_flag("product") {
        values.product()
    } else {
        values.sum()
    };

    println!(
        "{}: {}",
        parser.get_string("label"),
        accumulated * *scale.borrow()
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(false).compact().init();
}
