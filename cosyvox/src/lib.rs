//! Cosyvox
//!
//! Typed client for the DashScope CosyVoice voice-cloning and
//! text-to-speech HTTP API.
//!
//! The service offers two operations and this crate exposes exactly those:
//!
//! - **Voice enrollment**: register a reference audio sample (by URL) and
//!   receive an opaque voice identifier for later synthesis calls.
//! - **Speech synthesis**: convert plain text into audio bytes using a model
//!   and a voice identifier.
//!
//! The API credential is always threaded in explicitly through [`ApiConfig`];
//! the client never reads ambient process state on its own. Use
//! [`ApiConfig::from_env`] at the application edge when the conventional
//! `DASHSCOPE_API_KEY` environment variable is the source of truth.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cosyvox::{ApiConfig, DashScope, SynthesisRequest};
//!
//! let client = DashScope::new(ApiConfig::from_env()?);
//! let audio = client
//!     .synthesize(&SynthesisRequest::new("你好，世界", "my-voice-id"))
//!     .await?;
//! std::fs::write("out.mp3", &audio)?;
//! ```
//!
//! ## Module Structure
//!
//! - [`client`] - The [`DashScope`] client and wire types
//! - [`config`] - Explicit credential and endpoint configuration
//! - [`errors`] - Error types for remote operations
//! - [`types`] - Request parameter structs and fixed model constants

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-export main types at crate root for convenience
pub use client::DashScope;
pub use config::{ApiConfig, API_BASE_ENV, API_KEY_ENV, DASHSCOPE_BASE_URL};
pub use errors::VoxError;
pub use types::{
    EnrollmentRequest, SynthesisRequest, DEFAULT_MODEL, ENROLLMENT_MODEL, LANGUAGE_HINT,
};
