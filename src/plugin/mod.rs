pub mod dispatch;
pub mod launch;
pub mod listing;
pub mod url;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::system::opener::LaunchError;

pub use dispatch::Dispatcher;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("missing required parameter '{0}'")]
    MissingParam(&'static str),

    #[error("invalid value '{value}' for parameter '{name}'")]
    InvalidParam { name: &'static str, value: String },

    #[error("no program at position {index} (catalog has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Launch(#[from] LaunchError),
}
