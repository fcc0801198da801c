//! Option descriptors and the values they hold.
//!
//! An [`OptionDescriptor`] pairs a declared [`OptionKind`] with the [`OptionValue`] the
//! last processed argument vector assigned to it. The value variant always matches the
//! kind: a descriptor registered as [`OptionKind::Integer`] only ever holds
//! [`OptionValue::Integer`].

use crate::error::{
    Error, InvalidChoiceSnafu, InvalidChoicesSnafu, InvalidIntegerSnafu, InvalidRangeSnafu,
    OutOfRangeSnafu, UsageError,
};
use snafu::{ensure, ResultExt};
use std::fmt;

/// The declared type of an option, along with its constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// A flag with no value. Supplying it sets the option to `true`.
    Boolean,
    /// A signed integer restricted to the inclusive range `min..=max`.
    Integer { min: i64, max: i64 },
    /// An arbitrary string, taken verbatim.
    String,
    /// One of a fixed, ordered list of string choices. The stored value is the index
    /// of the matched choice.
    Feature { choices: Vec<String> },
}

impl OptionKind {
    pub fn integer(min: i64, max: i64) -> Self {
        Self::Integer { min, max }
    }

    pub fn feature<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Feature {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a [`OptionKind::Feature`] from a comma separated list such as
    /// `"enable,disable,auto"`. Whitespace around each choice is trimmed.
    pub fn feature_list(list: &str) -> Self {
        Self::feature(list.split(',').map(str::trim))
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Boolean => ValueType::Boolean,
            Self::Integer { .. } => ValueType::Integer,
            Self::String => ValueType::String,
            Self::Feature { .. } => ValueType::Feature,
        }
    }

    /// Placeholder shown after the flag in usage text, `None` for flags without a value.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            Self::Boolean => None,
            Self::Integer { min, max } => Some(format!("{min}..{max}")),
            Self::String => Some("string".to_string()),
            Self::Feature { choices } => Some(choices.join("|")),
        }
    }

    pub(crate) fn validate(&self, name: &str) -> Result<(), Error> {
        match self {
            Self::Integer { min, max } => {
                ensure!(
                    min <= max,
                    InvalidRangeSnafu {
                        name,
                        min: *min,
                        max: *max
                    }
                );
            },
            Self::Feature { choices } => {
                ensure!(
                    !choices.is_empty(),
                    InvalidChoicesSnafu {
                        name,
                        reason: "no choices declared",
                    }
                );
                for (i, choice) in choices.iter().enumerate() {
                    ensure!(
                        !choice.is_empty(),
                        InvalidChoicesSnafu {
                            name,
                            reason: "empty choice",
                        }
                    );
                    ensure!(
                        !choices[..i].contains(choice),
                        InvalidChoicesSnafu {
                            name,
                            reason: format!("duplicate choice `{choice}`"),
                        }
                    );
                }
            },
            Self::Boolean | Self::String => {},
        }
        Ok(())
    }

    /// Parse a raw argument into a value of this kind.
    ///
    /// `index` is the position of `raw` in the argument vector and is carried into any
    /// [`UsageError`] for diagnostics.
    pub(crate) fn parse_value(
        &self,
        name: &str,
        raw: &str,
        index: usize,
    ) -> Result<OptionValue, UsageError> {
        match self {
            Self::Boolean => Ok(OptionValue::Boolean(true)),
            Self::Integer { min, max } => {
                let value = raw.parse::<i64>().context(InvalidIntegerSnafu {
                    index,
                    name,
                    value: raw,
                })?;
                ensure!(
                    (*min..=*max).contains(&value),
                    OutOfRangeSnafu {
                        index,
                        name,
                        value,
                        min: *min,
                        max: *max
                    }
                );
                Ok(OptionValue::Integer(value))
            },
            Self::String => Ok(OptionValue::String(raw.to_owned())),
            Self::Feature { choices } => {
                let position = choices.iter().position(|c| c == raw);
                ensure!(
                    position.is_some(),
                    InvalidChoiceSnafu {
                        index,
                        name,
                        value: raw,
                        choices: choices.clone(),
                    }
                );
                Ok(OptionValue::Feature(position))
            },
        }
    }
}

/// The type tag of an [`OptionKind`] or [`OptionValue`], without constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Boolean,
    Integer,
    String,
    Feature,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Feature => "feature",
        };
        f.write_str(name)
    }
}

/// The current value of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Boolean(bool),
    Integer(i64),
    String(String),
    /// Index into the declared choices, `None` until a choice is matched.
    Feature(Option<usize>),
}

impl OptionValue {
    /// The zero value for a kind: `false`, `0`, `""` or no choice.
    pub fn zero(kind: &OptionKind) -> Self {
        match kind {
            OptionKind::Boolean => Self::Boolean(false),
            OptionKind::Integer { .. } => Self::Integer(0),
            OptionKind::String => Self::String(String::new()),
            OptionKind::Feature { .. } => Self::Feature(None),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Boolean(_) => ValueType::Boolean,
            Self::Integer(_) => ValueType::Integer,
            Self::String(_) => ValueType::String,
            Self::Feature(_) => ValueType::Feature,
        }
    }
}

/// A single registered option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    name: String,
    kind: OptionKind,
    value: OptionValue,
    present: bool,
}

impl OptionDescriptor {
    pub(crate) fn new(name: String, kind: OptionKind) -> Self {
        let value = OptionValue::zero(&kind);
        Self {
            name,
            kind,
            value,
            present: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    pub fn value(&self) -> &OptionValue {
        &self.value
    }

    /// Whether the option was supplied by a processed argument vector.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// The matched choice for a feature option.
    pub fn choice(&self) -> Option<&str> {
        match (&self.kind, &self.value) {
            (OptionKind::Feature { choices }, OptionValue::Feature(Some(index))) => {
                choices.get(*index).map(String::as_str)
            },
            _ => None,
        }
    }

    pub(crate) fn set(&mut self, value: OptionValue) {
        debug_assert_eq!(value.value_type(), self.kind.value_type());
        self.value = value;
        self.present = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_list_trims_choices() {
        let kind = OptionKind::feature_list("enable, disable ,auto");
        assert_eq!(kind, OptionKind::feature(["enable", "disable", "auto"]));
    }

    #[test]
    fn zero_values_match_kind() {
        assert_eq!(
            OptionValue::zero(&OptionKind::Boolean),
            OptionValue::Boolean(false)
        );
        assert_eq!(
            OptionValue::zero(&OptionKind::integer(-5, 5)),
            OptionValue::Integer(0)
        );
        assert_eq!(
            OptionValue::zero(&OptionKind::String),
            OptionValue::String(String::new())
        );
        assert_eq!(
            OptionValue::zero(&OptionKind::feature_list("a,b")),
            OptionValue::Feature(None)
        );
    }

    #[test]
    fn placeholders() {
        assert_eq!(OptionKind::Boolean.placeholder(), None);
        assert_eq!(
            OptionKind::integer(0, 100).placeholder().as_deref(),
            Some("0..100")
        );
        assert_eq!(
            OptionKind::feature_list("enable,disable,auto")
                .placeholder()
                .as_deref(),
            Some("enable|disable|auto")
        );
    }

    #[test]
    fn rejects_inverted_range() {
        let err = OptionKind::integer(10, 1).validate("level").unwrap_err();
        assert!(matches!(err, Error::InvalidRange { min: 10, max: 1, .. }));
    }

    #[test]
    fn rejects_bad_choices() {
        let empty = OptionKind::feature(Vec::<String>::new());
        assert!(matches!(
            empty.validate("mode"),
            Err(Error::InvalidChoices { .. })
        ));
        assert!(matches!(
            OptionKind::feature_list("a,,b").validate("mode"),
            Err(Error::InvalidChoices { .. })
        ));
        assert!(matches!(
            OptionKind::feature_list("a,b,a").validate("mode"),
            Err(Error::InvalidChoices { .. })
        ));
    }

    #[test]
    fn integer_bounds_are_inclusive() {
        let kind = OptionKind::integer(0, 100);
        assert_eq!(
            kind.parse_value("threshold", "0", 1).unwrap(),
            OptionValue::Integer(0)
        );
        assert_eq!(
            kind.parse_value("threshold", "100", 1).unwrap(),
            OptionValue::Integer(100)
        );
        assert!(matches!(
            kind.parse_value("threshold", "101", 1),
            Err(UsageError::OutOfRange { value: 101, .. })
        ));
        assert!(matches!(
            kind.parse_value("threshold", "-1", 1),
            Err(UsageError::OutOfRange { value: -1, .. })
        ));
        assert!(matches!(
            kind.parse_value("threshold", "fifty", 1),
            Err(UsageError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn feature_match_is_exact() {
        let kind = OptionKind::feature_list("enable,disable,auto");
        assert_eq!(
            kind.parse_value("auto_mode", "auto", 1).unwrap(),
            OptionValue::Feature(Some(2))
        );
        assert!(matches!(
            kind.parse_value("auto_mode", "Enable", 1),
            Err(UsageError::InvalidChoice { .. })
        ));
    }
}
