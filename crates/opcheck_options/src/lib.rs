//! opcheck_options: analysis options and their JSON form.
//!
//! Options are read from a JSON document such as
//!
//! ```json
//! { "level": 5, "checkNullables": true }
//! ```
//!
//! A `level` switches on groups of checks; explicit booleans override what
//! the level implies. [`AnalysisOptions::resolve`] flattens both into the
//! [`ResolvedOptions`] the checker consumes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Highest supported level.
pub const MAX_LEVEL: u8 = 8;

/// Level from which binary operations are checked.
pub const BINARY_OPERATIONS_LEVEL: u8 = 2;

/// Level from which every member of a union operand must be valid.
pub const UNION_TYPES_LEVEL: u8 = 7;

/// Level from which `null` members of operand types are checked.
pub const NULLABLES_LEVEL: u8 = 8;

/// Default level when none is given.
pub const DEFAULT_LEVEL: u8 = 5;

/// Options errors
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Failed to read options file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid level {0}: levels range from 0 to 8")]
    InvalidLevel(u8),
}

/// Result type for options operations
pub type OptionsResult<T> = Result<T, OptionsError>;

/// Analysis options as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalysisOptions {
    pub level: Option<u8>,
    pub check_union_types: Option<bool>,
    pub check_nullables: Option<bool>,
    pub report_binary_operations: Option<bool>,
}

/// Options with the level expanded and overrides applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub level: u8,
    /// Report operations on union operands even when some members are valid.
    pub check_union_types: bool,
    /// Keep `null` in operand types instead of stripping it before checks.
    pub check_nullables: bool,
    pub report_binary_operations: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self::for_level(DEFAULT_LEVEL)
    }
}

impl ResolvedOptions {
    /// The flags a level implies, without overrides. Levels above
    /// [`MAX_LEVEL`] behave as the maximum.
    pub fn for_level(level: u8) -> Self {
        Self {
            level,
            check_union_types: level >= UNION_TYPES_LEVEL,
            check_nullables: level >= NULLABLES_LEVEL,
            report_binary_operations: level >= BINARY_OPERATIONS_LEVEL,
        }
    }
}

impl AnalysisOptions {
    /// Expand the level and apply explicit overrides.
    pub fn resolve(&self) -> OptionsResult<ResolvedOptions> {
        let level = self.level.unwrap_or(DEFAULT_LEVEL);
        if level > MAX_LEVEL {
            return Err(OptionsError::InvalidLevel(level));
        }
        let base = ResolvedOptions::for_level(level);
        Ok(ResolvedOptions {
            level,
            check_union_types: self.check_union_types.unwrap_or(base.check_union_types),
            check_nullables: self.check_nullables.unwrap_or(base.check_nullables),
            report_binary_operations: self
                .report_binary_operations
                .unwrap_or(base.report_binary_operations),
        })
    }
}

/// Parse options from a JSON string.
pub fn parse_options(content: &str) -> OptionsResult<AnalysisOptions> {
    Ok(serde_json::from_str(content)?)
}

/// Parse options from a JSON file.
pub fn load_options_file(path: &Path) -> OptionsResult<AnalysisOptions> {
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_options(&content)
}
