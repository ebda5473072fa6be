//! Ordered multi-model fallback.
//!
//! Candidates are tried strictly in list order, one at a time. The first
//! usable result wins. A credential failure stops the loop at once, since no
//! other model can succeed with the same key.

use std::fmt::Display;
use std::future::Future;

use tracing::{debug, info, warn};

use crate::error::{AdcraftError, Capability, FailureSignal, Result};

/// A successful attempt and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackSuccess<T> {
    pub value: T,
    pub model: String,
    /// Calls made, including the successful one.
    pub attempts: usize,
}

/// Runs one unit of work against an ordered candidate list.
#[derive(Debug, Clone, Copy)]
pub struct FallbackExecutor {
    capability: Capability,
    classify: fn(&AdcraftError) -> FailureSignal,
}

impl FallbackExecutor {
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            classify: AdcraftError::failure_signal,
        }
    }

    /// Override how errors are classified.
    pub fn with_classifier(mut self, classify: fn(&AdcraftError) -> FailureSignal) -> Self {
        self.classify = classify;
        self
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Try `attempt` against each candidate in order.
    ///
    /// The unit of work is responsible for rejecting unusable results
    /// (empty text, undecodable payloads, missing media) by returning an
    /// error; such errors advance to the next candidate.
    pub async fn run<C, T, F, Fut>(&self, candidates: &[C], mut attempt: F) -> Result<FallbackSuccess<T>>
    where
        C: Display,
        F: FnMut(&C) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if candidates.is_empty() {
            return Err(AdcraftError::InvalidArgument(format!(
                "no {} candidates configured",
                self.capability
            )));
        }

        for (index, candidate) in candidates.iter().enumerate() {
            let attempts = index + 1;
            debug!(capability = %self.capability, model = %candidate, attempt = attempts, "Trying candidate");

            match attempt(candidate).await {
                Ok(value) => {
                    info!(capability = %self.capability, model = %candidate, attempts, "Candidate succeeded");
                    return Ok(FallbackSuccess {
                        value,
                        model: candidate.to_string(),
                        attempts,
                    });
                }
                Err(e) => {
                    if (self.classify)(&e) == FailureSignal::CredentialInvalid {
                        warn!(capability = %self.capability, model = %candidate, error = %e, "Credential rejected, aborting fallback");
                        return Err(e);
                    }
                    warn!(capability = %self.capability, model = %candidate, error = %e, "Candidate failed");
                }
            }
        }

        Err(AdcraftError::AllCandidatesExhausted {
            capability: self.capability,
            attempts: candidates.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn decode_failure_advances_to_next_candidate() {
        let calls = Mutex::new(Vec::new());
        let result = FallbackExecutor::new(Capability::CopyGeneration)
            .run(&["a", "b"], |model| {
                calls.lock().unwrap().push(model.to_string());
                let model = *model;
                async move {
                    if model == "a" {
                        Err(AdcraftError::DecodeInvalid("not json".into()))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result.value, 42);
        assert_eq!(result.model, "b");
        assert_eq!(result.attempts, 2);
        assert_eq!(*calls.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn empty_candidate_list_makes_no_call() {
        let mut called = false;
        let candidates: [&str; 0] = [];
        let err = FallbackExecutor::new(Capability::ImageGeneration)
            .run(&candidates, |_| {
                called = true;
                async { Ok(()) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AdcraftError::InvalidArgument(_)));
        assert!(!called);
    }

    #[tokio::test]
    async fn custom_classifier_can_promote_errors_to_credential_failures() {
        fn everything_is_credential(_: &AdcraftError) -> FailureSignal {
            FailureSignal::CredentialInvalid
        }
        let mut calls = 0;
        let err = FallbackExecutor::new(Capability::CopyGeneration)
            .with_classifier(everything_is_credential)
            .run(&["a", "b"], |_| {
                calls += 1;
                async { Err::<(), _>(AdcraftError::api(500, "boom")) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AdcraftError::Api { status: 500, .. }));
        assert_eq!(calls, 1);
    }
}
