//! The option table: registration, argument processing and typed lookup.
//!
//! An [`OptionTable`] is declared up front with [`OptionTable::register`], fed one or more
//! argument vectors with [`OptionTable::process`], then queried by name. Lookups are a
//! linear scan in registration order; tables are small and this keeps the order stable
//! for [`OptionTable::usage`].

use crate::{
    error::{
        DuplicateOptionSnafu, InvalidNameSnafu, MissingValueSnafu, NotFoundSnafu, Result,
        TypeMismatchSnafu, UnexpectedValueSnafu, UnknownOptionSnafu, UsageError,
    },
    option::{OptionDescriptor, OptionKind, OptionValue, ValueType},
};
use snafu::{ensure, OptionExt};
use tracing::debug;

/// How a call to [`OptionTable::process`] finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every argument was consumed.
    Completed,
    /// `--help` or `-h` was seen and no option named `help` is registered. Arguments after
    /// it were not processed.
    HelpRequested,
}

/// An ordered set of named, typed command line options.
#[derive(Debug, Default, Clone)]
pub struct OptionTable {
    options: Vec<OptionDescriptor>,
    positionals: Vec<String>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new option. It starts absent, holding the zero value for its kind.
    pub fn register(&mut self, name: impl Into<String>, kind: OptionKind) -> Result<()> {
        let name = name.into();
        ensure!(is_valid_name(&name), InvalidNameSnafu { name: &name });
        ensure!(
            self.position(&name).is_none(),
            DuplicateOptionSnafu { name: &name }
        );
        kind.validate(&name)?;

        debug!(%name, kind = %kind.value_type(), "registered option");
        self.options.push(OptionDescriptor::new(name, kind));
        Ok(())
    }

    /// Apply an argument vector to the table, not including the program name.
    ///
    /// Flags are `--name`, `--name value` or `--name=value`. A bare `--` ends flag
    /// scanning. Arguments that do not start with `-`, and a lone `-`, are collected as
    /// positional arguments; any other single dash argument is an unknown option.
    /// A flag given more than once keeps its last value.
    ///
    /// Processing stops at the first [`UsageError`]. Options applied before that point
    /// keep their new values; the failing option is left unchanged. Option values also
    /// carry over between calls, which lets defaults be processed ahead of the real
    /// command line. Positional arguments only reflect the most recent call.
    pub fn process<I, S>(&mut self, args: I) -> Result<Outcome, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        self.positionals.clear();

        let mut index = 0;
        while index < args.len() {
            let arg = args[index].as_ref();

            if arg == "--" {
                self.positionals
                    .extend(args[index + 1..].iter().map(|a| a.as_ref().to_owned()));
                break;
            }

            let Some(flag) = arg.strip_prefix("--") else {
                if arg == "-" || !arg.starts_with('-') {
                    self.positionals.push(arg.to_owned());
                    index += 1;
                    continue;
                }
                if arg == "-h" && !self.contains("help") {
                    return Ok(Outcome::HelpRequested);
                }
                debug!(flag = arg, "rejected short option");
                return UnknownOptionSnafu { index, flag: arg }.fail();
            };

            let (name, inline) = match flag.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (flag, None),
            };

            let Some(slot) = self.position(name) else {
                if name == "help" && inline.is_none() {
                    return Ok(Outcome::HelpRequested);
                }
                debug!(flag = arg, "rejected unknown option");
                return UnknownOptionSnafu { index, flag: arg }.fail();
            };

            index = self
                .apply(slot, &args, index, inline)
                .inspect_err(|err| debug!(%err, "rejected argument"))?;
        }

        Ok(Outcome::Completed)
    }

    /// Apply the flag at `args[index]` to `self.options[slot]`, returning the index of the
    /// next unconsumed argument.
    fn apply<S: AsRef<str>>(
        &mut self,
        slot: usize,
        args: &[S],
        index: usize,
        inline: Option<&str>,
    ) -> Result<usize, UsageError> {
        let descriptor = &mut self.options[slot];

        if descriptor.kind().value_type() == ValueType::Boolean {
            ensure!(
                inline.is_none(),
                UnexpectedValueSnafu {
                    index,
                    name: descriptor.name(),
                }
            );
            descriptor.set(OptionValue::Boolean(true));
            debug!(name = descriptor.name(), "enabled flag");
            return Ok(index + 1);
        }

        let (raw, value_index, next) = match inline {
            Some(raw) => (raw, index, index + 1),
            None => {
                let raw = args.get(index + 1).context(MissingValueSnafu {
                    index,
                    name: descriptor.name(),
                })?;
                (raw.as_ref(), index + 1, index + 2)
            },
        };

        let value = descriptor
            .kind()
            .parse_value(descriptor.name(), raw, value_index)?;
        debug!(name = descriptor.name(), ?value, "set option");
        descriptor.set(value);
        Ok(next)
    }

    /// Whether the named option was supplied.
    pub fn has_option(&self, name: &str) -> Result<bool> {
        Ok(self.lookup(name)?.is_present())
    }

    pub fn bool_value(&self, name: &str) -> Result<bool> {
        match self.lookup(name)?.value() {
            OptionValue::Boolean(value) => Ok(*value),
            other => mismatch(name, ValueType::Boolean, other),
        }
    }

    pub fn int_value(&self, name: &str) -> Result<i64> {
        match self.lookup(name)?.value() {
            OptionValue::Integer(value) => Ok(*value),
            other => mismatch(name, ValueType::Integer, other),
        }
    }

    /// The string value, empty when the option was not supplied.
    pub fn string_value(&self, name: &str) -> Result<&str> {
        match self.lookup(name)?.value() {
            OptionValue::String(value) => Ok(value),
            other => mismatch(name, ValueType::String, other),
        }
    }

    /// Index of the matched choice, `None` when the option was not supplied.
    pub fn feature_value(&self, name: &str) -> Result<Option<usize>> {
        match self.lookup(name)?.value() {
            OptionValue::Feature(index) => Ok(*index),
            other => mismatch(name, ValueType::Feature, other),
        }
    }

    /// The matched choice itself, `None` when the option was not supplied.
    pub fn feature_choice(&self, name: &str) -> Result<Option<&str>> {
        let descriptor = self.lookup(name)?;
        match descriptor.value() {
            OptionValue::Feature(_) => Ok(descriptor.choice()),
            other => mismatch(name, ValueType::Feature, other),
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionDescriptor> {
        self.options.iter().find(|o| o.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Non-flag arguments from the most recent [`OptionTable::process`] call.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Help text listing every option in registration order.
    pub fn usage(&self, program: &str) -> String {
        let mut out = format!("Usage: {program} [OPTIONS] [ARGS]...\n\nOptions:\n");
        for descriptor in &self.options {
            match descriptor.kind().placeholder() {
                Some(placeholder) => {
                    out.push_str(&format!("      --{} <{placeholder}>\n", descriptor.name()))
                },
                None => out.push_str(&format!("      --{}\n", descriptor.name())),
            }
        }
        if !self.contains("help") {
            out.push_str("  -h, --help\n");
        }
        out
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|o| o.name() == name)
    }

    fn lookup(&self, name: &str) -> Result<&OptionDescriptor> {
        self.get(name).context(NotFoundSnafu { name })
    }
}

fn mismatch<T>(name: &str, expected: ValueType, actual: &OptionValue) -> Result<T> {
    TypeMismatchSnafu {
        name,
        expected,
        actual: actual.value_type(),
    }
    .fail()
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(char::is_whitespace)
}
