mod error;
mod slr;

pub use crate::error::{GenerationError, GrammarProblem};
pub use crate::slr::*;
