//! Request payload types.
//!
//! The caller-facing payload is loosely typed: only the recipient descriptor
//! and the body are required, everything else flows opaquely into the front
//! matter of the intermediate document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::PdfError;

/// Recipient descriptor. A request needs a non-blank `name` or a first
/// `address` line to derive the output filename.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Recipient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

/// Structured document data as posted by the caller. Unknown fields are kept
/// in `extra` and serialized into the front matter verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DocumentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Recipient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

impl DocumentRequest {
    /// Raw recipient string used for filename derivation: the name if it is
    /// non-blank, otherwise the first address line.
    pub fn recipient(&self) -> Result<&str, PdfError> {
        let to = self.to.as_ref().ok_or(PdfError::MissingField("to"))?;
        to.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| to.address.first().map(String::as_str))
            .ok_or(PdfError::MissingRecipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization_keeps_extra_fields() {
        let json = r#"{
            "to": {"name": "Max Müller", "address": ["Street 1", "12345 Town"]},
            "body": "Hello",
            "subject": "Invoice 42",
            "VAT": 19
        }"#;

        let request: DocumentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.to.as_ref().unwrap().name.as_deref(), Some("Max Müller"));
        assert_eq!(request.body.as_deref(), Some("Hello"));
        assert_eq!(request.extra["subject"], "Invoice 42");
        assert_eq!(request.extra["VAT"], 19);
    }

    #[test]
    fn test_recipient_prefers_name() {
        let request: DocumentRequest = serde_json::from_str(
            r#"{"to": {"name": "Max Müller", "address": ["Street 1"]}, "body": "x"}"#,
        )
        .unwrap();
        assert_eq!(request.recipient().unwrap(), "Max Müller");
    }

    #[test]
    fn test_recipient_falls_back_to_first_address_line() {
        let request: DocumentRequest =
            serde_json::from_str(r#"{"to": {"address": ["Street 1"]}, "body": "x"}"#).unwrap();
        assert_eq!(request.recipient().unwrap(), "Street 1");

        let blank_name: DocumentRequest = serde_json::from_str(
            r#"{"to": {"name": "  ", "address": ["Street 1"]}, "body": "x"}"#,
        )
        .unwrap();
        assert_eq!(blank_name.recipient().unwrap(), "Street 1");
    }

    #[test]
    fn test_recipient_errors() {
        let no_to: DocumentRequest = serde_json::from_str(r#"{"body": "x"}"#).unwrap();
        assert!(matches!(
            no_to.recipient(),
            Err(PdfError::MissingField("to"))
        ));

        let empty_to: DocumentRequest =
            serde_json::from_str(r#"{"to": {}, "body": "x"}"#).unwrap();
        assert!(matches!(
            empty_to.recipient(),
            Err(PdfError::MissingRecipient)
        ));
    }
}
