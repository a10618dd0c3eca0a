//! Filesystem access for Strata
//!
//! Provides slash-normalized relative paths for configuration trees and
//! blocking read helpers that keep the offending path in their errors.

pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use io::{DirEntry, EntryKind};
pub use path::NormalizedPath;
