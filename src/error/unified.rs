//! Failure classification shared by every backend call.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a failure should propagate through the orchestrator.
///
/// Decided once from the typed error; callers never re-parse messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FailureSignal {
    /// The credential is unknown, revoked or leaked. Never retried.
    CredentialInvalid,
    /// Every candidate in a priority list failed.
    AllCandidatesExhausted,
    /// Anything another candidate (or a later attempt) might not hit.
    Transient,
}

/// Capability a candidate list is tried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Capability {
    CopyGeneration,
    ImageGeneration,
}

/// Structured error body returned by the Google API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: Option<u16>,
    pub status: Option<String>,
    pub reason: Option<String>,
}

/// Suggested recovery action for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    SelectNewCredential,
    RetryLater,
    RephrasePrompt,
    CheckConfiguration,
    None,
}
