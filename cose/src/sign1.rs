use super::*;
use cbor::encode::{Encoder, ToCbor};

/// COSE_Sign1: a payload with a single signature.
///
/// `[protected, unprotected, payload, signature]`
#[derive(Debug, Clone, PartialEq)]
pub struct Sign1Message {
    base: CoseMessage,
    message: Box<[u8]>,
    signature: Box<[u8]>,
}

impl Sign1Message {
    pub fn builder() -> Sign1Builder {
        Sign1Builder::default()
    }

    /// The signed payload.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

impl ToCbor for Sign1Message {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_array(4, |a| {
            self.base.emit_headers(a);
            a.emit(self.message());
            a.emit(self.signature());
        })
    }
}

impl CoseStructure for Sign1Message {
    const NAME: &'static str = "COSE_Sign1";

    fn headers(&self) -> &CoseMessage {
        &self.base
    }

    fn decode(item: Value) -> Result<Self, Error> {
        let [protected, unprotected, message, signature] = as_fixed_array(item, Self::NAME)?;
        Sign1Builder::default()
            .with_protected_header_bytes(as_byte_string(protected, "protected header")?)?
            .with_unprotected_headers(as_map(unprotected, "unprotected header")?)
            .with_message(as_byte_string(message, "payload")?)
            .with_signature(as_byte_string(signature, "signature")?)
            .build()
    }
}

impl TaggedCoseStructure for Sign1Message {
    const TAG: u64 = 18;
}

#[derive(Debug, Default)]
pub struct Sign1Builder {
    headers: HeaderBuilder,
    message: Option<Box<[u8]>>,
    signature: Option<Box<[u8]>>,
}

impl_header_setters!(Sign1Builder);

impl Sign1Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<Box<[u8]>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_signature(mut self, signature: impl Into<Box<[u8]>>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn build(self) -> Result<Sign1Message, Error> {
        let name = Sign1Message::NAME;
        Ok(Sign1Message {
            base: self.headers.build(name)?,
            message: require(self.message, name, "payload")?,
            signature: require(self.signature, name, "signature")?,
        })
    }
}
