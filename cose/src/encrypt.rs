use super::*;
use cbor::encode::{Encoder, ToCbor};

/// COSE_Encrypt: ciphertext with the content key delivered to each recipient.
///
/// `[protected, unprotected, ciphertext, [recipient...]]`
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptMessage {
    base: CoseMessage,
    ciphertext: Box<[u8]>,
    recipients: Vec<Recipient>,
}

impl EncryptMessage {
    pub fn builder() -> EncryptBuilder {
        EncryptBuilder::default()
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Recipients in wire order.
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }
}

impl ToCbor for EncryptMessage {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_array(4, |a| {
            self.base.emit_headers(a);
            a.emit(self.ciphertext());
            recipient::emit_recipients(a, &self.recipients);
        })
    }
}

impl CoseStructure for EncryptMessage {
    const NAME: &'static str = "COSE_Encrypt";

    fn headers(&self) -> &CoseMessage {
        &self.base
    }

    fn decode(item: Value) -> Result<Self, Error> {
        let [protected, unprotected, ciphertext, recipients] = as_fixed_array(item, Self::NAME)?;
        EncryptBuilder::default()
            .with_protected_header_bytes(as_byte_string(protected, "protected header")?)?
            .with_unprotected_headers(as_map(unprotected, "unprotected header")?)
            .with_ciphertext(as_byte_string(ciphertext, "ciphertext")?)
            .with_recipients(recipient::decode_recipients(recipients)?)
            .build()
    }
}

impl TaggedCoseStructure for EncryptMessage {
    const TAG: u64 = 96;
}

#[derive(Debug, Default)]
pub struct EncryptBuilder {
    headers: HeaderBuilder,
    ciphertext: Option<Box<[u8]>>,
    recipients: Option<Vec<Recipient>>,
}

impl_header_setters!(EncryptBuilder);

impl EncryptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ciphertext(mut self, ciphertext: impl Into<Box<[u8]>>) -> Self {
        self.ciphertext = Some(ciphertext.into());
        self
    }

    /// Replaces the recipient list.
    pub fn with_recipients(mut self, recipients: Vec<Recipient>) -> Self {
        self.recipients = Some(recipients);
        self
    }

    /// Appends one recipient, after any already added.
    pub fn add_recipient(mut self, recipient: Recipient) -> Self {
        self.recipients.get_or_insert_with(Vec::new).push(recipient);
        self
    }

    pub fn build(self) -> Result<EncryptMessage, Error> {
        let name = EncryptMessage::NAME;
        Ok(EncryptMessage {
            base: self.headers.build(name)?,
            ciphertext: require(self.ciphertext, name, "ciphertext")?,
            recipients: require(self.recipients, name, "recipients")?,
        })
    }
}
