/*!
Typed access to the decoded CBOR data-item tree.

Every accessor checks the kind of the item it is handed and reports a
[`DecodeError::TypeMismatch`] naming the field on a mismatch. Nothing is
coerced.
*/

use super::*;

/// Parses `data` as exactly one CBOR item.
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    let (value, shortest) = cbor::decode::parse_detail(data)?;
    if !shortest {
        trace!("Accepted CBOR item that is not in canonical form");
    }
    Ok(value)
}

/// Serializes one CBOR item canonically.
pub fn encode<T>(value: &T) -> Vec<u8>
where
    T: cbor::encode::ToCbor + ?Sized,
{
    cbor::encode::emit(value)
}

pub fn as_array(item: Value, field: &'static str) -> Result<Vec<Value>, DecodeError> {
    item.into_array().map_field_err(field)
}

/// As [`as_array`], also requiring exactly `N` items.
pub fn as_fixed_array<const N: usize>(
    item: Value,
    message: &'static str,
) -> Result<[Value; N], DecodeError> {
    let items = as_array(item, message)?;
    <[Value; N]>::try_from(items).map_err(|items| {
        debug!(
            "Rejecting {message}: {} items, expected {}",
            items.len(),
            N
        );
        DecodeError::ArityMismatch {
            message,
            expected: N,
            received: items.len(),
        }
    })
}

pub fn as_map(item: Value, field: &'static str) -> Result<HeaderMap, DecodeError> {
    item.into_map().map_field_err(field)
}

pub fn as_byte_string(item: Value, field: &'static str) -> Result<Box<[u8]>, DecodeError> {
    item.into_bytes().map(Vec::into_boxed_slice).map_field_err(field)
}

pub fn as_text_string<'a>(item: &'a Value, field: &'static str) -> Result<&'a str, DecodeError> {
    item.as_text().map_field_err(field)
}

pub fn as_integer(item: &Value, field: &'static str) -> Result<i64, DecodeError> {
    item.as_i64().map_field_err(field)
}

/// Strips the COSE tag `expected` if present. Untagged items pass through.
pub fn untag(item: Value, expected: u64) -> Result<Value, DecodeError> {
    match item {
        Value::Tagged(tag, inner) if tag == expected => Ok(*inner),
        Value::Tagged(found, _) => {
            debug!("Rejecting CBOR tag {found}, expected {expected}");
            Err(DecodeError::UnexpectedTag { expected, found })
        }
        item => Ok(item),
    }
}
