mod client;
mod export;
mod model;

pub use client::{BackendClient, BackendConfig};
pub use export::ClicksExport;
pub use model::*;

use derive_more::derive::{Display, Error};

#[derive(Debug, Error, Display)]
pub enum BackendError {
    #[display("Request to {url} failed")]
    Transport { url: String, source: reqwest_middleware::Error },

    #[display("API rate limit reached, retry in 30 seconds")]
    RateLimited,

    #[display("Backend responded with {status}: {detail}")]
    Status { status: u16, detail: String },

    #[display("Unexpected response from {url}")]
    Decode { url: String, source: reqwest::Error },

    #[display("Invalid CSV export")]
    Csv(csv::Error),
}

impl BackendError {
    /// Network and rate-limit failures are worth a retry, everything else needs a fix.
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::Transport { .. } | BackendError::RateLimited => true,
            BackendError::Status { status, .. } => *status >= 500,
            BackendError::Decode { .. } | BackendError::Csv(_) => false,
        }
    }
}
