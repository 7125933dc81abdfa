use thiserror::Error;

/// The error taxonomy surfaced to the CLI. `Outcome` (in `cdcl` and
/// `dpll`) is deliberately not a variant here: timeout and UNSAT are ordinary successful
/// conclusions of solving, not failures.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("malformed DIMACS input at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] serde_json::Error),

    /// A violated internal invariant. The solver panics rather than returning an error for
    /// these; this variant exists only so call sites that want to log before panicking have a
    /// typed value to format, and is never returned as `Err`.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

#[cfg(test)]
mod error_tests;
