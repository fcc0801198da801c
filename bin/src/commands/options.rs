//! Option table example: declare four options, process the arguments and report what
//! was set.

use super::Status;
use anyhow::Result;
use std::io::Write;
use tracing::{info, warn};
use trilo_options::{format_usage_error, OptionKind, OptionTable, Outcome};

/// Program name shown in usage text.
pub const PROGRAM: &str = "trilo options";

/// The options this example understands.
pub fn schema() -> trilo_options::Result<OptionTable> {
    let mut table = OptionTable::new();
    table.register("enable_logging", OptionKind::Boolean)?;
    table.register("threshold", OptionKind::integer(0, 100))?;
    table.register("output_file", OptionKind::String)?;
    table.register("auto_mode", OptionKind::feature_list("enable,disable,auto"))?;
    Ok(table)
}

/// Process `defaults` then `args`, printing the result to `out` and any usage problem to
/// `err`.
pub fn run(
    defaults: &[String],
    args: &[String],
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Status> {
    let mut table = schema()?;

    for (source, argv) in [("config default_args", defaults), ("command line", args)] {
        match table.process(argv) {
            Ok(Outcome::Completed) => {},
            Ok(Outcome::HelpRequested) => {
                write!(out, "{}", table.usage(PROGRAM))?;
                return Ok(Status::Success);
            },
            Err(error) => {
                warn!(source, %error, "rejected arguments");
                write!(err, "{}", format_usage_error(argv, &error))?;
                writeln!(err)?;
                write!(err, "{}", table.usage(PROGRAM))?;
                return Ok(Status::UsageError);
            },
        }
    }

    info!(
        defaults = defaults.len(),
        args = args.len(),
        "processed arguments"
    );
    report(&table, out)?;
    Ok(Status::Success)
}

fn report(table: &OptionTable, out: &mut impl Write) -> Result<()> {
    if table.has_option("enable_logging")? {
        writeln!(out, "Logging is enabled.")?;
    } else {
        writeln!(out, "Logging is disabled.")?;
    }

    if table.has_option("threshold")? {
        writeln!(out, "Threshold is set to {}.", table.int_value("threshold")?)?;
    }

    if table.has_option("output_file")? {
        writeln!(
            out,
            "Output file is set to '{}'.",
            table.string_value("output_file")?
        )?;
    }

    match table.feature_choice("auto_mode")? {
        Some("enable") => writeln!(out, "Auto mode is enabled.")?,
        Some("disable") => writeln!(out, "Auto mode is disabled.")?,
        Some(other) => writeln!(out, "Auto mode is set to '{other}'.")?,
        None => {},
    }

    if !table.positionals().is_empty() {
        writeln!(
            out,
            "Positional arguments: {}",
            table.positionals().join(", ")
        )?;
    }

    Ok(())
}
