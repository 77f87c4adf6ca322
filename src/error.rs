//! Crate-wide error type.

use crate::color::ColorError;
use crate::compose::ComposeError;
use crate::fluid::FluidError;
use crate::tokens::ResolveError;

/// Any failure raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    Fluid(#[from] FluidError),
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
