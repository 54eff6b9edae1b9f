use super::*;
use cbor::encode::{Encoder, ToCbor};

/// COSE_Mac0: a MAC'd payload for a key the recipient already holds.
///
/// `[protected, unprotected, payload, tag]`
#[derive(Debug, Clone, PartialEq)]
pub struct Mac0Message {
    base: CoseMessage,
    message: Box<[u8]>,
    tag: Box<[u8]>,
}

impl Mac0Message {
    pub fn builder() -> Mac0Builder {
        Mac0Builder::default()
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn tag(&self) -> &[u8] {
        &self.tag
    }
}

impl ToCbor for Mac0Message {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_array(4, |a| {
            self.base.emit_headers(a);
            a.emit(self.message());
            a.emit(self.tag());
        })
    }
}

impl CoseStructure for Mac0Message {
    const NAME: &'static str = "COSE_Mac0";

    fn headers(&self) -> &CoseMessage {
        &self.base
    }

    fn decode(item: Value) -> Result<Self, Error> {
        let [protected, unprotected, message, tag] = as_fixed_array(item, Self::NAME)?;
        Mac0Builder::default()
            .with_protected_header_bytes(as_byte_string(protected, "protected header")?)?
            .with_unprotected_headers(as_map(unprotected, "unprotected header")?)
            .with_message(as_byte_string(message, "payload")?)
            .with_tag(as_byte_string(tag, "tag")?)
            .build()
    }
}

impl TaggedCoseStructure for Mac0Message {
    const TAG: u64 = 17;
}

#[derive(Debug, Default)]
pub struct Mac0Builder {
    headers: HeaderBuilder,
    message: Option<Box<[u8]>>,
    tag: Option<Box<[u8]>>,
}

impl_header_setters!(Mac0Builder);

impl Mac0Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<Box<[u8]>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<Box<[u8]>>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn build(self) -> Result<Mac0Message, Error> {
        let name = Mac0Message::NAME;
        Ok(Mac0Message {
            base: self.headers.build(name)?,
            message: require(self.message, name, "payload")?,
            tag: require(self.tag, name, "tag")?,
        })
    }
}
