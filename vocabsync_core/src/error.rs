use std::error::Error as StdError;

use crate::vocab::schema::Violations;

/// Common error type for `vocabsync_core`.
///
/// Transport implementations should preserve the underlying error chain where
/// possible via `Error::channel`.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The vocabulary document could not be retrieved.
    #[error("failed to fetch vocabulary from {url}")]
    VocabFetch {
        url: String,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },

    /// The vocabulary document was retrieved but is unusable.
    #[error("malformed vocabulary document: {0}")]
    MalformedVocab(String),

    /// A term definition failed schema validation.
    #[error("{0}")]
    Validation(#[from] Violations),

    /// An application-level error answered by the record store service.
    #[error("{name}: {message}")]
    Remote { name: String, message: String },

    /// Request/response channel failure (connect, publish, decode, timeout).
    #[error("channel error: {context}")]
    Channel {
        context: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

impl Error {
    pub fn vocab_fetch(
        url: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::VocabFetch {
            url: url.into(),
            source: Box::new(source),
        }
    }

    #[tracing::instrument(level = "debug", name = "vocabsync.error.channel", skip(source))]
    pub fn channel(
        context: impl Into<String> + std::fmt::Debug,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Channel {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn channel_message(context: impl Into<String>) -> Self {
        Self::Channel {
            context: context.into(),
            source: None,
        }
    }

    /// True when this is the record store's typed not-found signal named
    /// `error_name`.
    pub fn is_not_found(&self, error_name: &str) -> bool {
        matches!(self, Self::Remote { name, .. } if name == error_name)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
