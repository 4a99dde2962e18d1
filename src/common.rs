use thiserror::Error;

/// Failure modes of a single discrete-log solve.
///
/// Both are recoverable for the caller: rerun the solve with a fresh
/// random exponent rather than aborting the whole run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RhoError {
    #[error("value has no modular inverse")]
    NoInverse,
    #[error("no collision within the iteration bound")]
    Exhausted,
}
