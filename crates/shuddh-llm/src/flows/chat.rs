use super::non_blank;
use crate::error::LlmError;
use crate::generator::{GenerationRequest, TextGenerator};

/// Free-text reply from the health assistant.
///
/// # Errors
///
/// Backend failures or a blank reply.
pub async fn chat(generator: &dyn TextGenerator, message: &str) -> Result<String, LlmError> {
    let prompt = format!(
        "You are a friendly health assistant for an air quality app. Answer questions about air \
         quality, pollution and how they affect health clearly and briefly. Do not give a diagnosis; \
         suggest seeing a doctor for medical concerns.\n\n\
         User: {message}\n\
         Assistant:"
    );

    let reply = generator.generate(GenerationRequest::text(prompt)).await?;
    non_blank(reply, "chat reply")
}
