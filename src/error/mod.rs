use crate::icon::IconError;
use thiserror::Error;

pub type TintResult<T> = std::result::Result<T, TintError>;

/// Boundary errors of this crate. Theme resolution itself is total and
/// never produces one; only icon decoding can fail.
#[derive(Debug, Error)]
pub enum TintError {
    #[error(transparent)]
    Icon(#[from] IconError),
}
