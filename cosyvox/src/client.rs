//! The DashScope HTTP client.
//!
//! Two endpoints, one method each:
//!
//! - `POST /api/v1/services/audio/tts/customization` - voice enrollment,
//!   JSON in / JSON out, returns a voice identifier.
//! - `POST /api/v1/services/audio/tts/speech-synthesizer` - speech synthesis,
//!   JSON in / raw audio bytes out.
//!
//! Both carry the API key as a bearer token. The remote service is treated as
//! an opaque collaborator: this module depends only on the documented
//! request/response shapes and maps everything else to [`VoxError`].

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::errors::VoxError;
use crate::types::{
    AUDIO_FORMAT, DEFAULT_MODEL, ENROLLMENT_MODEL, EnrollmentRequest, LANGUAGE_HINT,
    SynthesisRequest,
};

/// Path of the voice-enrollment (customization) endpoint.
pub const CUSTOMIZATION_PATH: &str = "/api/v1/services/audio/tts/customization";

/// Path of the speech-synthesis endpoint.
pub const SYNTHESIS_PATH: &str = "/api/v1/services/audio/tts/speech-synthesizer";

/// Operation labels used in error messages.
const OP_ENROLLMENT: &str = "voice enrollment";
const OP_SYNTHESIS: &str = "speech synthesis";

// ============================================================================
// Wire Types
// ============================================================================

/// Body of an enrollment request.
#[derive(Debug, Serialize)]
struct EnrollmentBody<'a> {
    model: &'a str,
    input: EnrollmentInput<'a>,
}

#[derive(Debug, Serialize)]
struct EnrollmentInput<'a> {
    action: &'a str,
    target_model: &'a str,
    prefix: &'a str,
    url: &'a str,
    language_hints: [&'a str; 1],
}

/// Successful enrollment response.
#[derive(Debug, Deserialize)]
struct EnrollmentResponse {
    output: Option<EnrollmentOutput>,
}

#[derive(Debug, Deserialize)]
struct EnrollmentOutput {
    voice_id: Option<String>,
}

/// Body of a synthesis request.
#[derive(Debug, Serialize)]
struct SynthesisBody<'a> {
    model: &'a str,
    input: SynthesisInput<'a>,
    parameters: SynthesisParameters<'a>,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SynthesisParameters<'a> {
    voice: &'a str,
    format: &'a str,
}

/// Error body the service attaches to non-success responses.
#[derive(Debug, Deserialize)]
struct ServiceFault {
    code: Option<String>,
    message: Option<String>,
}

impl ServiceFault {
    fn describe(self) -> Option<String> {
        match (self.code, self.message) {
            (Some(code), Some(message)) => Some(format!("{code}: {message}")),
            (None, Some(message)) => Some(message),
            (Some(code), None) => Some(code),
            (None, None) => None,
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Client for the DashScope CosyVoice service.
///
/// Holds one [`reqwest::Client`] and the explicit [`ApiConfig`]. Cheap to
/// construct; each CLI invocation makes exactly one call through it.
///
/// ## Examples
///
/// ```ignore
/// use cosyvox::{ApiConfig, DashScope, EnrollmentRequest};
///
/// let client = DashScope::new(ApiConfig::from_env()?);
/// let voice_id = client
///     .enroll_voice(&EnrollmentRequest::new("https://example.com/sample.wav", "myshow"))
///     .await?;
/// println!("enrolled as {voice_id}");
/// ```
pub struct DashScope {
    http: Client,
    config: ApiConfig,
}

impl std::fmt::Debug for DashScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashScope")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl DashScope {
    /// Create a client from an explicit configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Register a reference audio sample and return the generated voice
    /// identifier.
    ///
    /// The target model is fixed to [`DEFAULT_MODEL`] and the language hint
    /// to [`LANGUAGE_HINT`]; the service derives the identifier from the
    /// given prefix.
    ///
    /// ## Errors
    ///
    /// - [`VoxError::Http`] if the request cannot be completed.
    /// - [`VoxError::Api`] if the service answers with a non-success status.
    /// - [`VoxError::UnexpectedResponse`] if the success body carries no
    ///   voice identifier.
    pub async fn enroll_voice(&self, request: &EnrollmentRequest) -> Result<String, VoxError> {
        let url = format!("{}{}", self.config.base_url, CUSTOMIZATION_PATH);
        let body = EnrollmentBody {
            model: ENROLLMENT_MODEL,
            input: EnrollmentInput {
                action: "create_voice",
                target_model: DEFAULT_MODEL,
                prefix: &request.prefix,
                url: &request.audio_url,
                language_hints: [LANGUAGE_HINT],
            },
        };

        tracing::debug!(
            prefix = %request.prefix,
            audio_url = %request.audio_url,
            "Sending voice enrollment request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VoxError::Http {
                operation: OP_ENROLLMENT,
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(OP_ENROLLMENT, response).await);
        }

        let parsed: EnrollmentResponse =
            response.json().await.map_err(|e| VoxError::UnexpectedResponse {
                operation: OP_ENROLLMENT,
                detail: e.to_string(),
            })?;

        parsed
            .output
            .and_then(|output| output.voice_id)
            .ok_or_else(|| VoxError::UnexpectedResponse {
                operation: OP_ENROLLMENT,
                detail: "response contained no voice_id".into(),
            })
    }

    /// Synthesize audio from plain text and return the raw bytes.
    ///
    /// The response body is passed through verbatim; callers decide where the
    /// bytes go. An empty success body is reported as
    /// [`VoxError::EmptyAudio`] rather than an empty artifact.
    ///
    /// ## Errors
    ///
    /// - [`VoxError::Http`] if the request cannot be completed.
    /// - [`VoxError::Api`] if the service answers with a non-success status.
    /// - [`VoxError::EmptyAudio`] if the service claims success but sends no
    ///   bytes.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, VoxError> {
        let url = format!("{}{}", self.config.base_url, SYNTHESIS_PATH);
        let body = SynthesisBody {
            model: &request.model,
            input: SynthesisInput {
                text: &request.text,
            },
            parameters: SynthesisParameters {
                voice: &request.voice_id,
                format: AUDIO_FORMAT,
            },
        };

        tracing::debug!(
            model = %request.model,
            voice = %request.voice_id,
            text_len = request.text.len(),
            "Sending speech synthesis request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VoxError::Http {
                operation: OP_SYNTHESIS,
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(OP_SYNTHESIS, response).await);
        }

        let bytes = response.bytes().await.map_err(|e| VoxError::Http {
            operation: OP_SYNTHESIS,
            message: e.to_string(),
        })?;

        if bytes.is_empty() {
            return Err(VoxError::EmptyAudio);
        }

        tracing::debug!(audio_size = bytes.len(), "Received audio response");

        Ok(bytes.to_vec())
    }
}

/// Turn a non-success response into a [`VoxError::Api`], preferring the
/// service's own `{code, message}` body over raw text.
async fn error_from_response(operation: &'static str, response: reqwest::Response) -> VoxError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServiceFault>(&body)
        .ok()
        .and_then(ServiceFault::describe)
        .unwrap_or(body);

    VoxError::Api {
        operation,
        status,
        message,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DashScope {
        DashScope::new(ApiConfig::new("sk-test").with_base_url(server.uri()))
    }

    #[tokio::test]
    async fn test_enroll_voice_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(CUSTOMIZATION_PATH))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "voice-enrollment",
                "input": {
                    "action": "create_voice",
                    "target_model": "cosyvoice-v3-plus",
                    "prefix": "myshow",
                    "url": "https://example.com/sample.wav",
                    "language_hints": ["zh"]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"output":{"voice_id":"voice-123"},"request_id":"abc"}"#,
            ))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let request = EnrollmentRequest::new("https://example.com/sample.wav", "myshow");
        let voice_id = client.enroll_voice(&request).await.unwrap();

        assert_eq!(voice_id, "voice-123");
    }

    #[tokio::test]
    async fn test_enroll_voice_service_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(CUSTOMIZATION_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"code":"InvalidParameter","message":"url is not reachable"}"#,
            ))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let request = EnrollmentRequest::new("https://example.com/missing.wav", "myshow");
        let error = client.enroll_voice(&request).await.unwrap_err();

        match error {
            VoxError::Api {
                operation,
                status,
                message,
            } => {
                assert_eq!(operation, "voice enrollment");
                assert_eq!(status, 400);
                assert_eq!(message, "InvalidParameter: url is not reachable");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_enroll_voice_missing_voice_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(CUSTOMIZATION_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"request_id":"abc"}"#),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let request = EnrollmentRequest::new("https://example.com/sample.wav", "myshow");
        let error = client.enroll_voice(&request).await.unwrap_err();

        assert!(matches!(error, VoxError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_synthesize_success_returns_bytes_verbatim() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SYNTHESIS_PATH))
            .and(header("Authorization", "Bearer sk-test"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(vec![0x00u8, 0x01, 0x02]),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let request = SynthesisRequest::new("你好", "voice-123");
        let audio = client.synthesize(&request).await.unwrap();

        assert_eq!(audio, vec![0x00, 0x01, 0x02]);
    }

    #[tokio::test]
    async fn test_synthesize_sends_default_model() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SYNTHESIS_PATH))
            .and(body_partial_json(serde_json::json!({
                "model": "cosyvoice-v3-plus",
                "input": { "text": "hello" },
                "parameters": { "voice": "voice-123", "format": "mp3" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFFu8]))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let request = SynthesisRequest::new("hello", "voice-123");
        let audio = client.synthesize(&request).await.unwrap();

        assert_eq!(audio, vec![0xFF]);
    }

    #[tokio::test]
    async fn test_synthesize_empty_body_is_empty_audio() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SYNTHESIS_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let request = SynthesisRequest::new("hello", "voice-123");
        let error = client.synthesize(&request).await.unwrap_err();

        assert!(matches!(error, VoxError::EmptyAudio));
    }

    #[tokio::test]
    async fn test_synthesize_service_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SYNTHESIS_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                r#"{"code":"InvalidApiKey","message":"Invalid API-key provided."}"#,
            ))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let request = SynthesisRequest::new("hello", "voice-123");
        let error = client.synthesize(&request).await.unwrap_err();

        match error {
            VoxError::Api { status, message, .. } => {
                assert_eq!(status, 401);
                assert!(message.contains("InvalidApiKey"));
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        // Port 1 is never listening
        let client =
            DashScope::new(ApiConfig::new("sk-test").with_base_url("http://127.0.0.1:1"));
        let request = SynthesisRequest::new("hello", "voice-123");
        let error = client.synthesize(&request).await.unwrap_err();

        assert!(matches!(error, VoxError::Http { .. }));
    }
}
