use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use probe_model::Document;
use serde::Deserialize;

/// Form field carrying the uploaded statement file.
pub(crate) const FILE_FIELD: &str = "file";

/// Upload body: the document sits under a top-level `data` key.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadEnvelope {
    pub(crate) data: Document,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file part")]
    MissingFilePart,
    #[error("No selected file")]
    EmptyFilename,
    #[error("uploaded file is empty")]
    EmptyPayload,
    #[error("invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("invalid financial document: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Parses an upload envelope into the document handed to the evaluator.
pub(crate) fn parse_envelope(payload: &[u8]) -> Result<Document, UploadError> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Err(UploadError::EmptyPayload);
    }

    let envelope: UploadEnvelope = serde_json::from_slice(payload)?;
    Ok(envelope.data)
}

/// Pulls the bytes of the `file` field out of a multipart form.
pub(crate) async fn read_file_part(multipart: &mut Multipart) -> Result<Bytes, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // Without a filename the field is a plain form value, not a file part.
        let Some(file_name) = field.file_name() else {
            continue;
        };
        if file_name.trim().is_empty() {
            return Err(UploadError::EmptyFilename);
        }

        return Ok(field.bytes().await?);
    }

    Err(UploadError::MissingFilePart)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_enveloped_document() {
        let document = parse_envelope(
            br#"{"data": {"financials": [{"nature": "STANDALONE", "pnl": {"lineItems": {"netRevenue": 5}}}]}}"#,
        )
        .expect("envelope parses");

        assert_eq!(document.entries().len(), 1);
        assert!(document.entries()[0].is_standalone());
    }

    #[test]
    fn missing_data_key_is_invalid() {
        let err = parse_envelope(br#"{"financials": []}"#).expect_err("data key required");
        assert!(matches!(err, UploadError::InvalidJson(_)));
        assert!(err.to_string().contains("missing field `data`"));
    }

    #[test]
    fn non_sequence_entries_are_structural_errors() {
        let err = parse_envelope(br#"{"data": {"financials": {"nature": "STANDALONE"}}}"#)
            .expect_err("financials must be a list");
        assert!(matches!(err, UploadError::InvalidJson(_)));
    }

    #[test]
    fn blank_payload_is_rejected_before_parsing() {
        assert!(matches!(
            parse_envelope(b"  \n"),
            Err(UploadError::EmptyPayload)
        ));
    }
}
