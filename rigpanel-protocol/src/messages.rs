//! Message types for the status feed
//!
//! - Panel → rig: [`StatusRequest`]
//! - Rig → panel: [`StatusResponse`] carrying a [`StatusRecord`]

use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Method name of the status subscription
pub const STATUS_METHOD: &str = "status";

/// Errors from encoding or decoding feed messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Message is not valid JSON or does not match the expected shape
    Malformed { line: usize, column: usize },
    /// Request could not be serialized
    Encode,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Malformed { line, column } => {
                write!(f, "malformed status message at {}:{}", line, column)
            }
            ProtocolError::Encode => write!(f, "cannot encode status request"),
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(e: serde_json::Error) -> Self {
        ProtocolError::Malformed {
            line: e.line(),
            column: e.column(),
        }
    }
}

/// Request sent once when the feed connection opens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRequest<'a> {
    /// Method name, normally [`STATUS_METHOD`]
    pub method: &'a str,
    /// Request id echoed back by the rig process
    pub id: &'a str,
}

impl<'a> StatusRequest<'a> {
    /// Create a request for `method` with the given id
    pub const fn new(method: &'a str, id: &'a str) -> Self {
        Self { method, id }
    }

    /// Serialize to the JSON text sent on the wire
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|_| ProtocolError::Encode)
    }
}

/// A scalar field of a status record
///
/// The rig process is not consistent about types: power and frequency
/// arrive as numbers or as strings depending on the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl FieldValue {
    /// Whole-number rendering, truncating floats toward zero
    ///
    /// Text is returned as-is, so a frequency sent as `"144.390"` still
    /// shows up on the panel.
    pub fn integer(&self) -> IntegerDisplay<'_> {
        IntegerDisplay(self)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => fmt::Display::fmt(v, f),
            FieldValue::Float(v) => fmt::Display::fmt(v, f),
            FieldValue::Text(s) => f.pad(s),
            FieldValue::Bool(b) => fmt::Display::fmt(b, f),
        }
    }
}

/// Helper returned by [`FieldValue::integer`]
pub struct IntegerDisplay<'a>(&'a FieldValue);

impl fmt::Display for IntegerDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            FieldValue::Float(v) => fmt::Display::fmt(&(*v as i64), f),
            other => fmt::Display::fmt(other, f),
        }
    }
}

/// Rig status fields pushed by the feed
///
/// Absent fields mean "unchanged", not "cleared".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusRecord {
    #[serde(default)]
    pub mode: Option<FieldValue>,
    #[serde(default)]
    pub power: Option<FieldValue>,
    #[serde(default)]
    pub frequency: Option<FieldValue>,
    #[serde(default)]
    pub antenna: Option<FieldValue>,
}

impl StatusRecord {
    /// True if no field is present
    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.power.is_none()
            && self.frequency.is_none()
            && self.antenna.is_none()
    }
}

/// Envelope of every message received from the feed
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub id: Option<FieldValue>,
    #[serde(default)]
    pub result: Option<StatusRecord>,
}

/// Decode one feed message
///
/// Returns `Ok(None)` for well-formed messages without a result record
/// (acknowledgements, error replies).
pub fn decode_status(text: &str) -> Result<Option<StatusRecord>, ProtocolError> {
    let response: StatusResponse = serde_json::from_str(text)?;
    Ok(response.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_status_request_json() {
        let req = StatusRequest::new(STATUS_METHOD, "0");
        assert_eq!(req.to_json().unwrap(), r#"{"method":"status","id":"0"}"#);
    }

    #[test]
    fn test_decode_full_record() {
        let msg = r#"{"id":"0","result":{"mode":"FM","power":5,"frequency":144,"antenna":"V"}}"#;
        let record = decode_status(msg).unwrap().unwrap();

        assert_eq!(record.mode, Some(FieldValue::Text("FM".into())));
        assert_eq!(record.power, Some(FieldValue::Integer(5)));
        assert_eq!(record.frequency, Some(FieldValue::Integer(144)));
        assert_eq!(record.antenna, Some(FieldValue::Text("V".into())));
    }

    #[test]
    fn test_decode_partial_record() {
        let record = decode_status(r#"{"result":{"power":"50"}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(record.power, Some(FieldValue::Text("50".into())));
        assert!(record.mode.is_none());
        assert!(record.frequency.is_none());
        assert!(!record.is_empty());
    }

    #[test]
    fn test_decode_without_result() {
        assert_eq!(decode_status(r#"{"id":"0","error":"busy"}"#), Ok(None));
    }

    #[test]
    fn test_decode_malformed() {
        let result = decode_status("{\"result\":");
        assert!(matches!(result, Err(ProtocolError::Malformed { .. })));
    }

    #[test]
    fn test_field_value_integer_display() {
        assert_eq!(format!("{}", FieldValue::Float(144.39).integer()), "144");
        assert_eq!(format!("{}", FieldValue::Integer(7).integer()), "7");
        assert_eq!(format!("{}", FieldValue::Text("430".into()).integer()), "430");
        assert_eq!(format!("{:>3}", FieldValue::Text("FM".into())), " FM");
    }
}
