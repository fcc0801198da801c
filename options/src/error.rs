use crate::option::ValueType;
use ariadne::{Color, Label, Report, ReportKind, Source};
use snafu::Snafu;
use std::{num::ParseIntError, ops::Range};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Misuse of the declared option schema.
///
/// These indicate a bug in the program declaring or reading the options rather than bad
/// user input, so they are surfaced immediately instead of falling back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("option `{name}` is already registered"))]
    DuplicateOption { name: String },

    #[snafu(display("`{name}` is not a valid option name"))]
    InvalidName { name: String },

    #[snafu(display("option `{name}` has an empty range: {min} > {max}"))]
    InvalidRange { name: String, min: i64, max: i64 },

    #[snafu(display("option `{name}` has invalid choices: {reason}"))]
    InvalidChoices { name: String, reason: String },

    #[snafu(display("no option named `{name}`"))]
    NotFound { name: String },

    #[snafu(display("option `{name}` has type {actual}, not {expected}"))]
    TypeMismatch {
        name: String,
        expected: ValueType,
        actual: ValueType,
    },
}

/// Invalid command line input.
///
/// Every variant carries the `index` of the offending argument so it can be pointed at
/// by [`format_usage_error`].
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum UsageError {
    #[snafu(display("unknown option `{flag}`"))]
    UnknownOption { index: usize, flag: String },

    #[snafu(display("option `--{name}` requires a value"))]
    MissingValue { index: usize, name: String },

    #[snafu(display("option `--{name}` does not take a value"))]
    UnexpectedValue { index: usize, name: String },

    #[snafu(display("invalid integer `{value}` for option `--{name}`"))]
    InvalidInteger {
        index: usize,
        name: String,
        value: String,
        source: ParseIntError,
    },

    #[snafu(display("value {value} for option `--{name}` is outside {min}..{max}"))]
    OutOfRange {
        index: usize,
        name: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[snafu(display(
        "invalid choice `{value}` for option `--{name}`, expected one of: {}",
        choices.join(", ")
    ))]
    InvalidChoice {
        index: usize,
        name: String,
        value: String,
        choices: Vec<String>,
    },
}

impl UsageError {
    /// Position of the offending argument in the processed argument vector.
    pub fn index(&self) -> usize {
        match self {
            Self::UnknownOption { index, .. }
            | Self::MissingValue { index, .. }
            | Self::UnexpectedValue { index, .. }
            | Self::InvalidInteger { index, .. }
            | Self::OutOfRange { index, .. }
            | Self::InvalidChoice { index, .. } => *index,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::UnknownOption { .. } => "not a registered option",
            Self::MissingValue { .. } => "expected a value after this flag",
            Self::UnexpectedValue { .. } => "boolean flags take no value",
            Self::InvalidInteger { .. } => "not an integer",
            Self::OutOfRange { .. } => "out of range",
            Self::InvalidChoice { .. } => "not one of the declared choices",
        }
    }
}

/// Render a usage error against the argument vector it came from.
///
/// The arguments are joined with single spaces and the offending one is underlined.
pub fn format_usage_error<S: AsRef<str>>(args: &[S], error: &UsageError) -> String {
    let source = args
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    let span = argument_span(args, error.index());

    let mut output = Vec::new();
    Report::build(ReportKind::Error, (), span.start)
        .with_message(error.to_string())
        .with_label(
            Label::new(span)
                .with_color(Color::Red)
                .with_message(error.label()),
        )
        .finish()
        .write(Source::from(source.as_str()), &mut output)
        .ok();

    String::from_utf8(output).unwrap_or_default()
}

/// Character span of `args[index]` within the space joined argument line.
///
/// An index past the end yields an empty span at the end of the line.
fn argument_span<S: AsRef<str>>(args: &[S], index: usize) -> Range<usize> {
    let mut start = 0;
    for (i, arg) in args.iter().enumerate() {
        let len = arg.as_ref().chars().count();
        if i == index {
            return start..start + len;
        }
        start += len + 1;
    }
    let end = start.saturating_sub(1);
    end..end
}
