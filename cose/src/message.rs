use super::*;
use cbor::encode::{Array, ToCbor};

/// The header buckets every COSE structure starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct CoseMessage {
    protected: ProtectedHeader,
    unprotected: HeaderMap,
}

impl CoseMessage {
    /// The protected header exactly as it appears on the wire.
    pub fn protected_header_bytes(&self) -> &[u8] {
        self.protected.as_bytes()
    }

    /// Parses the protected header bytes. Nothing is cached, every call parses afresh.
    pub fn protected_headers(&self) -> Result<HeaderMap, DecodeError> {
        self.protected.to_map()
    }

    pub fn unprotected_headers(&self) -> &HeaderMap {
        &self.unprotected
    }

    pub(crate) fn emit_headers(&self, a: &mut Array) {
        a.emit(&self.protected);
        a.emit(&self.unprotected);
    }
}

#[derive(Debug, Clone)]
enum Protected {
    Bytes(ProtectedHeader),
    Map(ProtectedHeader),
}

/// Collects the header buckets for a message builder.
#[derive(Debug, Default)]
pub(crate) struct HeaderBuilder {
    protected: Option<Protected>,
    unprotected: Option<HeaderMap>,
}

impl HeaderBuilder {
    pub fn set_protected_bytes(&mut self, bytes: Box<[u8]>) -> Result<(), Error> {
        if let Some(Protected::Map(_)) = self.protected {
            return Err(Error::ConflictingProtectedHeaders);
        }
        self.protected = Some(Protected::Bytes(ProtectedHeader::from_bytes(bytes)));
        Ok(())
    }

    pub fn set_protected_map(&mut self, headers: &HeaderMap) -> Result<(), Error> {
        if let Some(Protected::Bytes(_)) = self.protected {
            return Err(Error::ConflictingProtectedHeaders);
        }
        self.protected = Some(Protected::Map(ProtectedHeader::from_map(headers)));
        Ok(())
    }

    pub fn set_unprotected(&mut self, headers: HeaderMap) {
        self.unprotected = Some(headers);
    }

    pub fn build(self, message: &'static str) -> Result<CoseMessage, Error> {
        let protected = match self.protected {
            Some(Protected::Bytes(p) | Protected::Map(p)) => p,
            None => {
                return Err(Error::MissingField {
                    message,
                    field: "protected header",
                });
            }
        };
        let unprotected = self.unprotected.ok_or(Error::MissingField {
            message,
            field: "unprotected header",
        })?;
        Ok(CoseMessage {
            protected,
            unprotected,
        })
    }
}

/// Returns the value of a required builder field.
pub(crate) fn require<T>(
    field: Option<T>,
    message: &'static str,
    name: &'static str,
) -> Result<T, Error> {
    field.ok_or(Error::MissingField {
        message,
        field: name,
    })
}

/// Adds the header setters shared by every builder. The builder must have a `headers: HeaderBuilder` field.
macro_rules! impl_header_setters {
    ($builder:ty) => {
        impl $builder {
            /// Uses `bytes` verbatim as the serialized protected header.
            ///
            /// Fails if the protected header was already set from a map.
            pub fn with_protected_header_bytes(
                mut self,
                bytes: impl Into<Box<[u8]>>,
            ) -> Result<Self, Error> {
                self.headers.set_protected_bytes(bytes.into())?;
                Ok(self)
            }

            /// Canonically encodes `headers` once as the protected header.
            /// An empty map encodes as a zero-length byte string.
            ///
            /// Fails if the protected header was already set from bytes.
            pub fn with_protected_headers(mut self, headers: HeaderMap) -> Result<Self, Error> {
                self.headers.set_protected_map(&headers)?;
                Ok(self)
            }

            pub fn with_unprotected_headers(mut self, headers: HeaderMap) -> Self {
                self.headers.set_unprotected(headers);
                self
            }
        }
    };
}
pub(crate) use impl_header_setters;

/// Shared decode shape of `[protected, unprotected, ciphertext]`, used by
/// COSE_Encrypt0 and COSE_recipient alike.
pub(crate) fn decode_ciphertext_triple(
    item: Value,
    message: &'static str,
) -> Result<(Box<[u8]>, HeaderMap, Box<[u8]>), DecodeError> {
    let [protected, unprotected, ciphertext] = as_fixed_array(item, message)?;
    Ok((
        as_byte_string(protected, "protected header")?,
        as_map(unprotected, "unprotected header")?,
        as_byte_string(ciphertext, "ciphertext")?,
    ))
}

/// A COSE structure carried as a CBOR array.
///
/// Encoding is provided by [`ToCbor`]; implementors supply [`decode`](Self::decode)
/// and gain byte level (de)serialization and header accessors.
pub trait CoseStructure: ToCbor + Sized {
    /// Structure name as written in RFC 9052, used in errors and logs.
    const NAME: &'static str;

    fn headers(&self) -> &CoseMessage;

    /// Rebuilds the structure from a decoded CBOR array, through its builder.
    fn decode(item: Value) -> Result<Self, Error>;

    fn serialize(&self) -> Vec<u8> {
        let data = cbor_utils::encode(self);
        trace!("Encoded {} of {} bytes", Self::NAME, data.len());
        data
    }

    fn deserialize(data: &[u8]) -> Result<Self, Error> {
        let item = cbor_utils::decode(data)?;
        let msg = Self::decode(item)?;
        trace!("Decoded {} from {} bytes", Self::NAME, data.len());
        Ok(msg)
    }

    fn protected_header_bytes(&self) -> &[u8] {
        self.headers().protected_header_bytes()
    }

    fn protected_headers(&self) -> Result<HeaderMap, DecodeError> {
        self.headers().protected_headers()
    }

    fn unprotected_headers(&self) -> &HeaderMap {
        self.headers().unprotected_headers()
    }
}

/// A COSE message with a CBOR tag of its own.
///
/// The untagged form from [`CoseStructure`] remains the default.
pub trait TaggedCoseStructure: CoseStructure {
    const TAG: u64;

    fn serialize_tagged(&self) -> Vec<u8> {
        cbor::encode::emit_tagged(self, Self::TAG)
    }

    /// Accepts the bare array, or the array wrapped in exactly [`Self::TAG`].
    fn deserialize_tagged(data: &[u8]) -> Result<Self, Error> {
        let item = untag(cbor_utils::decode(data)?, Self::TAG)?;
        let msg = Self::decode(item)?;
        trace!("Decoded {} from {} bytes", Self::NAME, data.len());
        Ok(msg)
    }
}
