//! Error types for adcraft.

pub mod unified;

pub use unified::{Capability, ErrorDetails, FailureSignal, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all adcraft operations.
#[derive(Error, Debug)]
pub enum AdcraftError {
    #[error("Credential rejected: {0}")]
    CredentialInvalid(String),

    #[error("All {capability} candidates failed after {attempts} attempts")]
    AllCandidatesExhausted { capability: Capability, attempts: usize },

    #[error("Invalid response structure: {0}")]
    DecodeInvalid(String),

    #[error("No media returned: {0}")]
    NoMediaReturned(String),

    #[error("Media download failed (status {status})")]
    DownloadFailed { status: u16 },

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<ErrorDetails>,
    },

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("History quota exceeded: {bytes} bytes > {quota} bytes")]
    HistoryQuotaExceeded { bytes: usize, quota: usize },

    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

impl AdcraftError {
    /// Create an API error without details.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            details: None,
        }
    }

    /// Create an API error with the decoded error body.
    pub fn api_with_details(status: u16, message: impl Into<String>, details: ErrorDetails) -> Self {
        Self::Api {
            status,
            message: message.into(),
            details: Some(details),
        }
    }

    /// Classify this error for propagation.
    pub fn failure_signal(&self) -> FailureSignal {
        match self {
            Self::CredentialInvalid(_) => FailureSignal::CredentialInvalid,
            Self::AllCandidatesExhausted { .. } => FailureSignal::AllCandidatesExhausted,
            _ => FailureSignal::Transient,
        }
    }

    /// Whether the fallback loop must stop and propagate this error.
    pub fn is_credential_invalid(&self) -> bool {
        self.failure_signal() == FailureSignal::CredentialInvalid
    }

    /// Whether the caller should ask the user for a new credential.
    pub fn requires_new_credential(&self) -> bool {
        self.is_credential_invalid()
    }

    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self {
            Self::CredentialInvalid(_) => RecoverySuggestion::SelectNewCredential,
            Self::AllCandidatesExhausted { .. } | Self::DecodeInvalid(_) => {
                RecoverySuggestion::RephrasePrompt
            }
            Self::RateLimited { .. }
            | Self::Network(_)
            | Self::Timeout(_)
            | Self::DownloadFailed { .. } => RecoverySuggestion::RetryLater,
            Self::Api { status, .. } if *status >= 500 => RecoverySuggestion::RetryLater,
            Self::Configuration(_) => RecoverySuggestion::CheckConfiguration,
            _ => RecoverySuggestion::None,
        }
    }

    /// Short localized message for the presentation layer.
    pub fn user_message(&self) -> String {
        match self {
            Self::CredentialInvalid(_) => "Tu llave de API ha sido reportada como filtrada o no es válida. Por favor, selecciona una nueva llave de API.".to_string(),
            Self::AllCandidatesExhausted { .. } => "Todos los modelos de IA fallaron al generar el contenido. Esto puede ser por saturación o un prompt inválido.".to_string(),
            Self::NoMediaReturned(_) => "La IA no devolvió ningún archivo.".to_string(),
            Self::DownloadFailed { .. } => "No se pudo descargar el video generado.".to_string(),
            Self::Cancelled => "Operación cancelada.".to_string(),
            _ => "Error al procesar con IA. Verifica tu conexión o cuota.".to_string(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AdcraftError>;
