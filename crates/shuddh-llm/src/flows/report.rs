use serde::Deserialize;

use super::{generate_json, non_blank};
use crate::error::LlmError;
use crate::generator::{GenerationRequest, InlineData, TextGenerator};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportOutput {
    extracted_text: String,
}

/// OCR of a health report (image or PDF) passed as a base64 data URI.
///
/// The URI is validated before any request is made.
///
/// # Errors
///
/// [`LlmError::InvalidInput`] for a malformed URI, otherwise backend or parse failures.
pub async fn extract_health_report_text(
    generator: &dyn TextGenerator,
    report_data_uri: &str,
) -> Result<String, LlmError> {
    let attachment = InlineData::from_data_uri(report_data_uri)?;
    let prompt = "You are an OCR tool specialized in medical documents. Extract all of the text from the \
                  attached document, keeping its structure and formatting where possible.\n\
                  Respond with JSON only, in the form { \"extractedText\": \"<text>\" }.";

    let output: ReportOutput = generate_json(
        generator,
        GenerationRequest::json(prompt).with_attachment(attachment),
        "extractTextFromHealthReport",
    )
    .await?;
    non_blank(output.extracted_text, "extracted text")
}
