//! Text-generation capability for Shuddh.
//!
//! [`TextGenerator`] is the opaque "generate text given a prompt" seam;
//! [`GeminiClient`] implements it against the Google Generative Language API.
//! The [`flows`] module turns structured inputs into prompts and parses the
//! model's JSON answers back into typed values.

pub mod error;
pub mod flows;
pub mod gemini;
pub mod generator;

pub use error::LlmError;
pub use gemini::GeminiClient;
pub use generator::{GenerationRequest, InlineData, TextGenerator};
