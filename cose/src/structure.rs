/*!
The to-be-processed structures of RFC 9052.

Signing, MAC and AEAD engines operate over these byte strings rather than the
message itself: `Sig_structure` (§4.4), `MAC_structure` (§6.3) and
`Enc_structure` (§5.3). Protected header bytes are embedded exactly as
stored, so the result only depends on bytes that travel on the wire.
*/

use super::*;

/// Context strings that open each structure.
pub mod context {
    pub const SIGNATURE1: &str = "Signature1";
    pub const MAC: &str = "MAC";
    pub const MAC0: &str = "MAC0";
    pub const ENCRYPT: &str = "Encrypt";
    pub const ENCRYPT0: &str = "Encrypt0";
    pub const ENC_RECIPIENT: &str = "Enc_Recipient";
}

/// `Sig_structure` for COSE_Sign1: `["Signature1", body_protected, external_aad, payload]`.
pub fn sig_structure1(protected: &[u8], external_aad: &[u8], payload: &[u8]) -> Vec<u8> {
    cbor::encode::emit_array(4, |a| {
        a.emit(context::SIGNATURE1);
        a.emit(protected);
        a.emit(external_aad);
        a.emit(payload);
    })
}

/// `MAC_structure`: `[context, protected, external_aad, payload]`.
pub fn mac_structure(
    context: &str,
    protected: &[u8],
    external_aad: &[u8],
    payload: &[u8],
) -> Vec<u8> {
    cbor::encode::emit_array(4, |a| {
        a.emit(context);
        a.emit(protected);
        a.emit(external_aad);
        a.emit(payload);
    })
}

/// `Enc_structure`: `[context, protected, external_aad]`.
pub fn enc_structure(context: &str, protected: &[u8], external_aad: &[u8]) -> Vec<u8> {
    cbor::encode::emit_array(3, |a| {
        a.emit(context);
        a.emit(protected);
        a.emit(external_aad);
    })
}

impl Sign1Message {
    /// The bytes a signer signs, and a verifier checks `signature()` against.
    pub fn to_be_signed(&self, external_aad: &[u8]) -> Vec<u8> {
        sig_structure1(self.protected_header_bytes(), external_aad, self.message())
    }
}

impl MacMessage {
    /// The bytes `tag()` is computed over.
    pub fn to_be_maced(&self, external_aad: &[u8]) -> Vec<u8> {
        mac_structure(
            context::MAC,
            self.protected_header_bytes(),
            external_aad,
            self.message(),
        )
    }
}

impl Mac0Message {
    pub fn to_be_maced(&self, external_aad: &[u8]) -> Vec<u8> {
        mac_structure(
            context::MAC0,
            self.protected_header_bytes(),
            external_aad,
            self.message(),
        )
    }
}

impl Encrypt0Message {
    /// The AEAD additional data for `ciphertext()`.
    pub fn enc_structure(&self, external_aad: &[u8]) -> Vec<u8> {
        enc_structure(context::ENCRYPT0, self.protected_header_bytes(), external_aad)
    }
}

impl EncryptMessage {
    pub fn enc_structure(&self, external_aad: &[u8]) -> Vec<u8> {
        enc_structure(context::ENCRYPT, self.protected_header_bytes(), external_aad)
    }
}

impl Recipient {
    /// The AEAD additional data when the recipient itself carries an AEAD-wrapped key.
    pub fn enc_structure(&self, external_aad: &[u8]) -> Vec<u8> {
        enc_structure(
            context::ENC_RECIPIENT,
            self.protected_header_bytes(),
            external_aad,
        )
    }
}
