//! Request parameter structs and the fixed model constants.

/// Default synthesis model, also the enrollment target model.
pub const DEFAULT_MODEL: &str = "cosyvoice-v3-plus";

/// Model identifier the service uses for voice-enrollment requests.
pub const ENROLLMENT_MODEL: &str = "voice-enrollment";

/// Fixed language hint passed with every enrollment request.
pub const LANGUAGE_HINT: &str = "zh";

/// Audio container requested from the synthesis endpoint.
pub const AUDIO_FORMAT: &str = "mp3";

/// Parameters for registering a reference audio sample.
#[derive(Debug, Clone)]
pub struct EnrollmentRequest {
    /// Publicly reachable URL of the reference audio.
    pub audio_url: String,
    /// Label prefix the service embeds in the generated voice identifier.
    pub prefix: String,
}

impl EnrollmentRequest {
    pub fn new(audio_url: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            prefix: prefix.into(),
        }
    }
}

/// Parameters for one synthesis call.
///
/// The text is plain UTF-8; the service has no SSML support, so no markup
/// handling happens on this side either.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Text to speak.
    pub text: String,
    /// Voice identifier from a prior enrollment (or a built-in voice).
    pub voice_id: String,
    /// Synthesis model.
    pub model: String,
}

impl SynthesisRequest {
    /// Build a request using [`DEFAULT_MODEL`].
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Select a different synthesis model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
