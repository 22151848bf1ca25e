use thiserror::Error;

use crate::runtime::contract::InputError;

/// Internal failure taxonomy. Callers only ever see the handler's generic
/// error body; the variant and detail go to the log.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("record store write failed: {0}")]
    Store(String),
    #[error("metrics emission failed: {0}")]
    Metrics(String),
}

impl HandlerError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Input(_) => "input",
            Self::Store(_) => "store",
            Self::Metrics(_) => "metrics",
        }
    }
}
