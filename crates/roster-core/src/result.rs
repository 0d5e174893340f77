//! Result type aliases

use crate::error::RosterError;

/// Standard Result type for roster operations
pub type RosterResult<T> = Result<T, RosterError>;
