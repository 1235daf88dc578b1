//! Common error infrastructure for vale-core.
//!
//! Domain-specific errors (`ActionError`, `StateError`, `OracleError`) live next
//! to the code that raises them. They all implement [`GameError`] so the engine
//! can classify a failure without matching on every variant.
//!
//! None of these errors ever escapes a world tick. The engine folds them into
//! no-op outcomes or skipped spawns and keeps going.

/// Severity level of an error, used for categorization and logging.
///
/// - **Recoverable**: may succeed later (target moved away, tile occupied)
/// - **Validation**: the request itself is wrong (no such item, wrong weapon)
/// - **Internal**: state inconsistency that indicates a bug
/// - **Fatal**: the environment is incomplete (missing oracle)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug rather than a game rule.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all vale-core errors.
///
/// Use `#[derive(thiserror::Error)]` for `Display`/`Error` and classify
/// severity by recoverability, not by gameplay impact.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, suitable for structured logs.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
