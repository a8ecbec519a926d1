//! Uniform reply envelope shared by every collaborator call.
//!
//! The collaborator contract is error-first: a reply is either the typed
//! success payload for the call, or a JSON object carrying a single `error`
//! string. This module owns decoding that envelope so individual call
//! modules only describe their success payloads.

use crate::{AssistantError, AssistantResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// The `{"error": "..."}` failure shape.
#[derive(Deserialize)]
struct ErrorShape {
    error: String,
}

/// Reply envelope operations.
///
/// This is a zero-sized type used for namespacing envelope handling.
/// All methods are associated functions.
pub struct Reply;

impl Reply {
    /// Decodes a raw collaborator reply into the call's payload type.
    ///
    /// The error shape is tried first: a reply that decodes as
    /// `{"error": ...}` is a service failure even if extra keys are present.
    /// Otherwise the text is decoded as `T`, with `serde_path_to_error`
    /// surfacing a best-effort path (e.g. `quiz[0].answer`) to the failing
    /// field when the payload does not match.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Service`] for the error shape, or
    /// [`AssistantError::Malformed`] when the text is not valid JSON or does
    /// not match the payload schema.
    pub fn parse<T>(json_text: &str) -> AssistantResult<T>
    where
        T: DeserializeOwned,
    {
        if let Ok(shape) = serde_json::from_str::<ErrorShape>(json_text) {
            return Err(AssistantError::Service(shape.error));
        }

        let mut deserializer = serde_json::Deserializer::from_str(json_text);
        match serde_path_to_error::deserialize::<_, T>(&mut deserializer) {
            Ok(payload) => Ok(payload),
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                Err(AssistantError::Malformed(format!(
                    "reply schema mismatch at {path}: {source}"
                )))
            }
        }
    }
}
