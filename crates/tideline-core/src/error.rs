//! Error types for the Tideline transect model.
//!
//! Organised by when they surface: construction ([`ConfigError`]),
//! collaborator calls ([`ModelError`], [`NumericFailure`]), and annual
//! stepping ([`StepError`]). Terminal geomorphic states are not errors;
//! see [`TerminationReason`](crate::TerminationReason).

use std::error::Error;
use std::fmt;

use crate::status::TerminationReason;

// ── NumericFailure ─────────────────────────────────────────────────

/// A recoverable failure while integrating the bay equations.
///
/// Returned by bay right-hand sides and by the implicit integrator.
/// The hydrodynamics coupler catches these and holds geometry for the
/// year instead of aborting the run.
#[derive(Clone, Debug, PartialEq)]
pub enum NumericFailure {
    /// A quantity left the domain where the equations are defined
    /// (non-positive depth or fetch, step size underflow, ...).
    Domain {
        /// Description of the violated domain condition.
        reason: String,
    },
    /// A computed quantity was infinite or NaN.
    Overflow {
        /// The quantity that overflowed.
        quantity: String,
    },
}

impl fmt::Display for NumericFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain { reason } => write!(f, "domain error: {reason}"),
            Self::Overflow { quantity } => write!(f, "overflow in {quantity}"),
        }
    }
}

impl Error for NumericFailure {}

// ── ModelError ─────────────────────────────────────────────────────

/// A collaborator model could not produce a usable result.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// The model failed for a model-specific reason.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The model returned a vector of the wrong length.
    OutputLength {
        /// Name of the offending output.
        output: &'static str,
        /// Expected number of elements.
        expected: usize,
        /// Number of elements returned.
        actual: usize,
    },
    /// A numeric failure the model could not recover from.
    Numeric(NumericFailure),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::OutputLength {
                output,
                expected,
                actual,
            } => write!(
                f,
                "output '{output}' has {actual} elements, expected {expected}"
            ),
            Self::Numeric(e) => write!(f, "numeric failure: {e}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Numeric(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NumericFailure> for ModelError {
    fn from(e: NumericFailure) -> Self {
        Self::Numeric(e)
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating configuration or constructing a run.
///
/// Any of these aborts construction; no engine is produced.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The transect has zero cells.
    EmptyDomain,
    /// A parameter name is not recognised.
    UnknownParameter {
        /// The unrecognised name.
        name: String,
    },
    /// A parameter was set with a value of the wrong kind.
    ParameterKind {
        /// Parameter name.
        name: String,
        /// Kind the parameter expects.
        expected: &'static str,
    },
    /// A parameter value is out of range.
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Description of the violated constraint.
        reason: String,
    },
    /// An input table has the wrong shape.
    ShapeMismatch {
        /// Which table.
        table: &'static str,
        /// Expected `(rows, columns)`.
        expected: (usize, usize),
        /// Actual `(rows, columns)`.
        actual: (usize, usize),
    },
    /// The spin-up history is too short for the forest backfill window.
    SpinUpTooShort {
        /// Spin-up years supplied.
        years: usize,
        /// Minimum years required.
        required: usize,
    },
    /// The initial transect violates the edge ordering.
    InvalidTransect {
        /// Description of the violation.
        reason: String,
    },
    /// The transect builder failed.
    Builder(ModelError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDomain => write!(f, "transect has zero cells"),
            Self::UnknownParameter { name } => write!(f, "unknown parameter '{name}'"),
            Self::ParameterKind { name, expected } => {
                write!(f, "parameter '{name}' expects a {expected} value")
            }
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
            Self::ShapeMismatch {
                table,
                expected,
                actual,
            } => write!(
                f,
                "table '{table}' has shape {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::SpinUpTooShort { years, required } => write!(
                f,
                "spin-up has {years} years, at least {required} required"
            ),
            Self::InvalidTransect { reason } => write!(f, "invalid transect: {reason}"),
            Self::Builder(e) => write!(f, "transect builder: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Builder(e) => Some(e),
            _ => None,
        }
    }
}

// ── StepError ──────────────────────────────────────────────────────

/// Errors from advancing a run by one year.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The run already ended in a terminal geomorphic state.
    Terminated {
        /// Why the run ended.
        reason: TerminationReason,
    },
    /// The run already reached its configured duration.
    Completed,
    /// A collaborator model failed; the engine is now disabled.
    ModelFailed {
        /// Name of the failing model.
        name: String,
        /// The underlying model error.
        reason: ModelError,
    },
    /// Stepping is disabled after an earlier model failure.
    Disabled,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminated { reason } => write!(f, "run terminated: {reason}"),
            Self::Completed => write!(f, "run completed"),
            Self::ModelFailed { name, reason } => write!(f, "model '{name}' failed: {reason}"),
            Self::Disabled => write!(f, "stepping disabled after model failure"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ModelFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
