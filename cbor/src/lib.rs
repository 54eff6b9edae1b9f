/*!
RFC 8949 canonical CBOR for the COSE codec.

Encoding always produces the deterministic form of RFC 8949 §4.2.1: definite
lengths, shortest-form heads, map keys ordered by the bytewise order of their
encodings. Decoding builds an owned [`value::Value`] tree, rejects
indefinite-length items and duplicate map keys, and reports whether the input
was already in canonical form.
*/
#![no_std]
extern crate alloc;

pub mod decode;
pub mod encode;
pub mod value;


#[cfg(test)]
mod encode_tests;
