//! Typed command line option tables.
//!
//! Declare options with [`OptionTable::register`], feed the argument vector to
//! [`OptionTable::process`], then read results back by name:
//!
//! ```
//! use trilo_options::{OptionKind, OptionTable, Outcome};
//!
//! let mut table = OptionTable::new();
//! table.register("threshold", OptionKind::integer(0, 100)).unwrap();
//! table.register("auto_mode", OptionKind::feature_list("enable,disable,auto")).unwrap();
//!
//! let outcome = table.process(["--threshold", "50", "--auto_mode", "auto"]).unwrap();
//! assert_eq!(outcome, Outcome::Completed);
//! assert_eq!(table.int_value("threshold").unwrap(), 50);
//! assert_eq!(table.feature_choice("auto_mode").unwrap(), Some("auto"));
//! ```

mod error;
mod option;
mod table;

pub use error::{format_usage_error, Error, Result, UsageError};
pub use option::{OptionDescriptor, OptionKind, OptionValue, ValueType};
pub use table::{OptionTable, Outcome};
