use super::*;
use cbor::encode::{Encoder, ToCbor};

/// COSE_recipient: how the content key reached one recipient.
///
/// `[protected, unprotected, ciphertext]`, where an empty ciphertext means no
/// key material was wrapped (direct use or key agreement).
/// Recipients are single level and never nest further recipients.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    base: CoseMessage,
    ciphertext: Box<[u8]>,
}

impl Recipient {
    pub fn builder() -> RecipientBuilder {
        RecipientBuilder::default()
    }

    /// The wrapped key, possibly empty.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

impl ToCbor for Recipient {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_array(3, |a| {
            self.base.emit_headers(a);
            a.emit(self.ciphertext());
        })
    }
}

impl CoseStructure for Recipient {
    const NAME: &'static str = "COSE_recipient";

    fn headers(&self) -> &CoseMessage {
        &self.base
    }

    fn decode(item: Value) -> Result<Self, Error> {
        let (protected, unprotected, ciphertext) = decode_ciphertext_triple(item, Self::NAME)?;
        RecipientBuilder::default()
            .with_protected_header_bytes(protected)?
            .with_unprotected_headers(unprotected)
            .with_ciphertext(ciphertext)
            .build()
    }
}

/// Decodes an ordered recipient list.
pub(crate) fn decode_recipients(item: Value) -> Result<Vec<Recipient>, Error> {
    as_array(item, "recipients")?
        .into_iter()
        .map(Recipient::decode)
        .collect()
}

pub(crate) fn emit_recipients(a: &mut cbor::encode::Array, recipients: &[Recipient]) {
    a.emit_array(recipients.len(), |a| {
        for r in recipients {
            a.emit(r);
        }
    })
}

#[derive(Debug, Default)]
pub struct RecipientBuilder {
    headers: HeaderBuilder,
    ciphertext: Option<Box<[u8]>>,
}

impl_header_setters!(RecipientBuilder);

impl RecipientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ciphertext(mut self, ciphertext: impl Into<Box<[u8]>>) -> Self {
        self.ciphertext = Some(ciphertext.into());
        self
    }

    pub fn build(self) -> Result<Recipient, Error> {
        let name = Recipient::NAME;
        Ok(Recipient {
            base: self.headers.build(name)?,
            ciphertext: require(self.ciphertext, name, "ciphertext")?,
        })
    }
}
