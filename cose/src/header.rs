use super::*;
use cbor::encode::{Encoder, ToCbor};

/// A COSE header map: labels (integers or text) to values, kept in canonical order.
pub type HeaderMap = cbor::value::Map;

/// Common header parameter labels from the IANA "COSE Header Parameters" registry.
pub mod label {
    pub const ALGORITHM: i64 = 1;
    pub const CRITICAL: i64 = 2;
    pub const CONTENT_TYPE: i64 = 3;
    pub const KEY_ID: i64 = 4;
    pub const IV: i64 = 5;
    pub const PARTIAL_IV: i64 = 6;
    pub const COUNTER_SIGNATURE: i64 = 7;
}

/// The serialized protected header bucket.
///
/// Held exactly as supplied or as encoded once at construction, and emitted
/// as a byte string without ever being re-derived from a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedHeader(Box<[u8]>);

impl ProtectedHeader {
    pub fn from_bytes(bytes: Box<[u8]>) -> Self {
        Self(bytes)
    }

    /// An empty map becomes a zero-length byte string, not an encoded empty map.
    pub fn from_map(headers: &HeaderMap) -> Self {
        if headers.is_empty() {
            Self::default()
        } else {
            Self(cbor_utils::encode(headers).into())
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_map(&self) -> Result<HeaderMap, DecodeError> {
        if self.0.is_empty() {
            Ok(HeaderMap::new())
        } else {
            as_map(cbor_utils::decode(&self.0)?, "protected header")
        }
    }
}

impl ToCbor for ProtectedHeader {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit(self.as_bytes())
    }
}

/// The content type header carries either a CoAP content format or a media type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    Format(u64),
    Media(String),
}

impl From<ContentType> for Value {
    fn from(value: ContentType) -> Self {
        match value {
            ContentType::Format(f) => Value::UnsignedInteger(f),
            ContentType::Media(m) => Value::Text(m),
        }
    }
}

/// Typed access to well-known header parameters.
pub trait HeaderMapExt {
    fn algorithm(&self) -> Result<Option<Algorithm>, DecodeError>;
    fn key_id(&self) -> Result<Option<&[u8]>, DecodeError>;
    fn content_type(&self) -> Result<Option<ContentType>, DecodeError>;

    fn set_algorithm(&mut self, algorithm: Algorithm);
    fn set_key_id(&mut self, key_id: &[u8]);
    fn set_content_type(&mut self, content_type: ContentType);
}

impl HeaderMapExt for HeaderMap {
    fn algorithm(&self) -> Result<Option<Algorithm>, DecodeError> {
        self.get(label::ALGORITHM)
            .map(|v| as_integer(v, "algorithm").map(Algorithm::from))
            .transpose()
    }

    fn key_id(&self) -> Result<Option<&[u8]>, DecodeError> {
        self.get(label::KEY_ID)
            .map(|v| v.as_bytes().map_field_err("key id"))
            .transpose()
    }

    fn content_type(&self) -> Result<Option<ContentType>, DecodeError> {
        self.get(label::CONTENT_TYPE)
            .map(|v| match v {
                Value::UnsignedInteger(f) => Ok(ContentType::Format(*f)),
                v => as_text_string(v, "content type").map(|m| ContentType::Media(m.into())),
            })
            .transpose()
    }

    fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.insert(label::ALGORITHM, algorithm);
    }

    fn set_key_id(&mut self, key_id: &[u8]) {
        self.insert(label::KEY_ID, key_id);
    }

    fn set_content_type(&mut self, content_type: ContentType) {
        self.insert(label::CONTENT_TYPE, content_type);
    }
}
