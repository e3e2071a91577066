use std::error::Error;
use std::fmt;

/// Errors raised by the chain simulator and the linear algebra routines.
#[derive(Debug, Clone, PartialEq)]
pub enum NumlabError {
    /// A scalar argument was outside its admissible range.
    InvalidParameter { name: &'static str, value: f64 },
    /// Column `column` has no component outside the span of the preceding columns.
    DegenerateSubspace { column: usize },
    /// An observed path never leaves `state`, so its transitions cannot be estimated.
    InsufficientTransitions { state: u8 },
    /// Operand dimensions do not line up.
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Input to a symmetric-only routine; `asymmetry` is the largest `|a_ij - a_ji|`.
    NotSymmetric { asymmetry: f64 },
    /// The backend could not invert or solve the system.
    Singular,
}

impl fmt::Display for NumlabError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NumlabError::InvalidParameter { name, value } => {
                write!(f, "Invalid value {} for parameter `{}`", value, name)
            }
            NumlabError::DegenerateSubspace { column } => write!(
                f,
                "Column {} is linearly dependent on the preceding columns",
                column
            ),
            NumlabError::InsufficientTransitions { state } => {
                write!(f, "No transitions out of state {} were observed", state)
            }
            NumlabError::ShapeMismatch { expected, found } => write!(
                f,
                "Shape mismatch: expected {:?}, found {:?}",
                expected, found
            ),
            NumlabError::NotSymmetric { asymmetry } => write!(
                f,
                "Matrix is not symmetric (max |a_ij - a_ji| = {:e})",
                asymmetry
            ),
            NumlabError::Singular => write!(f, "Matrix is singular to working precision"),
        }
    }
}

impl Error for NumlabError {}

pub type Result<T> = std::result::Result<T, NumlabError>;
