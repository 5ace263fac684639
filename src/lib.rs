//! Typemove - move named type imports out of storage modules into a shared types module

pub mod directive;
pub mod error;
pub mod file_utils;
pub mod imports;
pub mod output;
pub mod relocate;
pub mod relocation;
pub mod runner;
pub mod walker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Result, TypemoveError};
pub use imports::{ImportStatement, find_import, scan_imports};
pub use output::{SummaryConfig, print_summary, print_summary_json, write_summary};
pub use relocate::{Conflict, FileRelocation, Outcome, Relocation, relocate, relocate_all};
pub use relocation::{DEFAULT_DESTINATION, RelocationMap, RelocationRule};
pub use runner::{DEFAULT_ROOTS, FileConflict, ModifiedFile, Relocator, RunSummary};
