use super::*;
use cbor::encode::{Encoder, ToCbor};

/// COSE_Encrypt0: ciphertext for a key the recipient already holds.
///
/// `[protected, unprotected, ciphertext]`
#[derive(Debug, Clone, PartialEq)]
pub struct Encrypt0Message {
    base: CoseMessage,
    ciphertext: Box<[u8]>,
}

impl Encrypt0Message {
    pub fn builder() -> Encrypt0Builder {
        Encrypt0Builder::default()
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

impl ToCbor for Encrypt0Message {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_array(3, |a| {
            self.base.emit_headers(a);
            a.emit(self.ciphertext());
        })
    }
}

impl CoseStructure for Encrypt0Message {
    const NAME: &'static str = "COSE_Encrypt0";

    fn headers(&self) -> &CoseMessage {
        &self.base
    }

    fn decode(item: Value) -> Result<Self, Error> {
        let (protected, unprotected, ciphertext) = decode_ciphertext_triple(item, Self::NAME)?;
        Encrypt0Builder::default()
            .with_protected_header_bytes(protected)?
            .with_unprotected_headers(unprotected)
            .with_ciphertext(ciphertext)
            .build()
    }
}

impl TaggedCoseStructure for Encrypt0Message {
    const TAG: u64 = 16;
}

#[derive(Debug, Default)]
pub struct Encrypt0Builder {
    headers: HeaderBuilder,
    ciphertext: Option<Box<[u8]>>,
}

impl_header_setters!(Encrypt0Builder);

impl Encrypt0Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ciphertext(mut self, ciphertext: impl Into<Box<[u8]>>) -> Self {
        self.ciphertext = Some(ciphertext.into());
        self
    }

    pub fn build(self) -> Result<Encrypt0Message, Error> {
        let name = Encrypt0Message::NAME;
        Ok(Encrypt0Message {
            base: self.headers.build(name)?,
            ciphertext: require(self.ciphertext, name, "ciphertext")?,
        })
    }
}
