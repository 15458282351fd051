//! Common error infrastructure for battle-core.
//!
//! This module provides the shared classification used by every error type in
//! the crate. Domain-specific errors (e.g., `GridError`, `TurnError`) are
//! defined next to the operations that produce them.
//!
//! # Design Principles
//!
//! - **Return values only**: expected conditions never panic
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Battle-ending signals are not bugs**: an army that cannot start its turn
//!   ends the battle; it is reported as [`ErrorSeverity::Terminal`]

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the operation was skipped; the battle can go on
/// - **Terminal**: the battle cannot continue, but state is consistent (win/loss)
/// - **Internal**: a caller broke a contract; indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the request was a no-op.
    ///
    /// Examples: unknown unit type, spawn cell occupied
    Recoverable,

    /// Terminal condition - the battle is decided.
    ///
    /// Examples: empty army, no living controller left
    Terminal,

    /// Internal error - a caller broke the tick protocol.
    ///
    /// Examples: updating an army whose turn was never started
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Terminal => "terminal",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the failed operation can simply be skipped.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BattleErrorKind: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for log fields and testing.
    fn error_code(&self) -> &'static str;
}
