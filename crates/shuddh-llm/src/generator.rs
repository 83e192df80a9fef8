use async_trait::async_trait;

use crate::error::LlmError;

/// Base64 payload sent alongside the prompt (images, PDFs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl InlineData {
    /// Parses `data:<mime>;base64,<payload>`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::InvalidInput`] when the URI is not a base64 data URI
    /// with a MIME type and a non-empty payload.
    pub fn from_data_uri(uri: &str) -> Result<Self, LlmError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| LlmError::InvalidInput("expected a data: URI".to_string()))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| LlmError::InvalidInput("data URI has no payload".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| LlmError::InvalidInput("data URI must be base64 encoded".to_string()))?;

        if mime_type.is_empty() || !mime_type.contains('/') {
            return Err(LlmError::InvalidInput(format!(
                "data URI has no valid MIME type: '{mime_type}'"
            )));
        }
        if data.is_empty() {
            return Err(LlmError::InvalidInput("data URI payload is empty".to_string()));
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }
}

/// One generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Ask the backend to answer with a JSON document only.
    pub json_output: bool,
    pub attachment: Option<InlineData>,
}

impl GenerationRequest {
    #[must_use]
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            json_output: false,
            attachment: None,
        }
    }

    #[must_use]
    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            json_output: true,
            attachment: None,
        }
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: InlineData) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// The opaque text-generation capability every flow runs against.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `request`.
    ///
    /// # Errors
    ///
    /// Any backend, transport or empty-output failure as an [`LlmError`].
    async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError>;
}
