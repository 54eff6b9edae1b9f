use super::*;
use cbor::encode::{Encoder, ToCbor};

/// COSE_Mac: a MAC'd payload with the MAC key delivered to each recipient.
///
/// `[protected, unprotected, payload, tag, [recipient...]]`
#[derive(Debug, Clone, PartialEq)]
pub struct MacMessage {
    base: CoseMessage,
    message: Box<[u8]>,
    tag: Box<[u8]>,
    recipients: Vec<Recipient>,
}

impl MacMessage {
    pub fn builder() -> MacBuilder {
        MacBuilder::default()
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    /// Recipients in wire order.
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }
}

impl ToCbor for MacMessage {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_array(5, |a| {
            self.base.emit_headers(a);
            a.emit(self.message());
            a.emit(self.tag());
            recipient::emit_recipients(a, &self.recipients);
        })
    }
}

impl CoseStructure for MacMessage {
    const NAME: &'static str = "COSE_Mac";

    fn headers(&self) -> &CoseMessage {
        &self.base
    }

    fn decode(item: Value) -> Result<Self, Error> {
        let [protected, unprotected, message, tag, recipients] =
            as_fixed_array(item, Self::NAME)?;
        MacBuilder::default()
            .with_protected_header_bytes(as_byte_string(protected, "protected header")?)?
            .with_unprotected_headers(as_map(unprotected, "unprotected header")?)
            .with_message(as_byte_string(message, "payload")?)
            .with_tag(as_byte_string(tag, "tag")?)
            .with_recipients(recipient::decode_recipients(recipients)?)
            .build()
    }
}

impl TaggedCoseStructure for MacMessage {
    const TAG: u64 = 97;
}

#[derive(Debug, Default)]
pub struct MacBuilder {
    headers: HeaderBuilder,
    message: Option<Box<[u8]>>,
    tag: Option<Box<[u8]>>,
    recipients: Option<Vec<Recipient>>,
}

impl_header_setters!(MacBuilder);

impl MacBuilder {
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

    /// Replaces the recipient list. An empty list is accepted.
    pub fn with_recipients(mut self, recipients: Vec<Recipient>) -> Self {
        self.recipients = Some(recipients);
        self
    }

    /// Appends one recipient, after any already added.
    pub fn add_recipient(mut self, recipient: Recipient) -> Self {
        self.recipients.get_or_insert_with(Vec::new).push(recipient);
        self
    }

    pub fn build(self) -> Result<MacMessage, Error> {
        let name = MacMessage::NAME;
        Ok(MacMessage {
            base: self.headers.build(name)?,
            message: require(self.message, name, "payload")?,
            tag: require(self.tag, name, "tag")?,
            recipients: require(self.recipients, name, "recipients")?,
        })
    }
}
