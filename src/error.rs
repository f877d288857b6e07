use thiserror::Error;

use crate::domain::assembler::validation::ValidationError;
use crate::domain::global_config::global_config::AuthoringMode;
use crate::domain::node::node_kind::NodeKind;
use crate::domain::node_store::StoreError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Scenario is not valid for submission: {0}")]
    Validation(#[from] ValidationError),

    #[error("Node store rejected the operation: {0}")]
    Store(#[from] StoreError),

    #[error("The {kind} tool cannot be armed in {mode} mode")]
    ToolUnavailable { mode: AuthoringMode, kind: NodeKind },

    #[error("Failed to reach the generation service: {0}")]
    Transport(String),

    #[error("Simulation generation failed: {detail}")]
    Submission { status: Option<u16>, detail: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authoring script could not be replayed: {0}")]
    Script(String),
}

/// Raised when a textual value does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Unknown node kind: '{0}'")]
    UnknownNodeKind(String),

    #[error("Unknown attack strategy: '{0}'")]
    UnknownStrategy(String),

    #[error("Unknown intensity level: '{0}'")]
    UnknownIntensity(String),

    #[error("Unknown density level: '{0}'")]
    UnknownDensity(String),

    #[error("Unknown authoring mode: '{0}'")]
    UnknownMode(String),

    #[error("Unknown vehicle distribution: '{0}'")]
    UnknownDistribution(String),
}

pub type Result<T> = std::result::Result<T, Error>;
