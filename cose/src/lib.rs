/*!
A byte-exact structural codec for COSE (RFC 9052) messages.

Messages are assembled through builders and serialized as CBOR arrays, or
deserialized from bytes back into the same immutable types. Protected header
bytes are carried verbatim and never re-encoded, so anything signed, MAC'd or
encrypted over them elsewhere keeps verifying.

No cryptography happens here: [`structure`] assembles the exact byte strings
that signing, MAC and AEAD engines operate on, and callers take it from there.
*/

use cose_cbor as cbor;
use tracing::*;

mod algorithm;
mod cbor_utils;
mod encrypt;
mod encrypt0;
mod error;
mod header;
mod mac;
mod mac0;
mod message;
mod recipient;
mod sign1;

pub mod structure;

use cbor::value::Value;
use cbor_utils::*;
use error::CaptureFieldErr;
use header::*;
use message::*;

pub use algorithm::Algorithm;
pub use encrypt::{EncryptBuilder, EncryptMessage};
pub use encrypt0::{Encrypt0Builder, Encrypt0Message};
pub use error::{DecodeError, Error};
pub use header::{ContentType, HeaderMap, HeaderMapExt, label};
pub use mac::{MacBuilder, MacMessage};
pub use mac0::{Mac0Builder, Mac0Message};
pub use message::{CoseMessage, CoseStructure, TaggedCoseStructure};
pub use recipient::{Recipient, RecipientBuilder};
pub use sign1::{Sign1Builder, Sign1Message};

pub mod prelude {
    pub use super::algorithm::Algorithm;
    pub use super::encrypt::EncryptMessage;
    pub use super::encrypt0::Encrypt0Message;
    pub use super::error::{DecodeError, Error};
    pub use super::header::{HeaderMap, HeaderMapExt, label};
    pub use super::mac::MacMessage;
    pub use super::mac0::Mac0Message;
    pub use super::message::{CoseStructure, TaggedCoseStructure};
    pub use super::recipient::Recipient;
    pub use super::sign1::Sign1Message;
}


#[cfg(test)]
mod mac_tests;
