use super::encode::lossless_float_coerce;
use super::value::{Map, SimpleValue, Value};
use alloc::{boxed::Box, string::String, vec::Vec};
use thiserror::Error;

/// Default bound on array/map/tag nesting.
pub const MAX_RECURSION: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Need at least {0} more bytes")]
    NeedMoreData(usize),

    #[error("Invalid minor-type value {0}")]
    InvalidMinorValue(u8),

    #[error("Tags with no following value")]
    JustTags,

    #[error("Invalid simple type {0}")]
    InvalidSimpleType(u8),

    #[error("Indefinite-length items are not supported")]
    IndefiniteLength,

    #[error("Map has duplicate keys")]
    DuplicateMapKey,

    #[error("Maximum recursion depth reached")]
    MaxRecursion,

    #[error("Additional data found after the end of the item")]
    AdditionalItems,

    #[error(transparent)]
    InvalidUtf8(#[from] core::str::Utf8Error),
}

fn take<const N: usize>(data: &[u8]) -> Result<[u8; N], Error> {
    if data.len() < N {
        return Err(Error::NeedMoreData(N - data.len()));
    }
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&data[..N]);
    Ok(bytes)
}

/// Returns the argument, whether it used the shortest head, and the bytes consumed.
fn parse_uint_minor(minor: u8, data: &[u8]) -> Result<(u64, bool, usize), Error> {
    match minor {
        24 => {
            let v = take::<1>(data)?[0] as u64;
            Ok((v, v >= 24, 1))
        }
        25 => {
            let v = u16::from_be_bytes(take(data)?) as u64;
            Ok((v, v > u8::MAX as u64, 2))
        }
        26 => {
            let v = u32::from_be_bytes(take(data)?) as u64;
            Ok((v, v > u16::MAX as u64, 4))
        }
        27 => {
            let v = u64::from_be_bytes(take(data)?);
            Ok((v, v > u32::MAX as u64, 8))
        }
        val if val < 24 => Ok((val as u64, true, 0)),
        _ => Err(Error::InvalidMinorValue(minor)),
    }
}

fn parse_data_minor(len: u64, data: &[u8]) -> Result<&[u8], Error> {
    match usize::try_from(len) {
        Ok(len) if len <= data.len() => Ok(&data[..len]),
        Ok(len) => Err(Error::NeedMoreData(len - data.len())),
        Err(_) => Err(Error::NeedMoreData(usize::MAX)),
    }
}

fn parse_simple(minor: u8, data: &[u8]) -> Result<(Value, bool, usize), Error> {
    match minor {
        0..=19 => Ok((Value::Simple(SimpleValue(minor)), true, 0)),
        20 => Ok((Value::False, true, 0)),
        21 => Ok((Value::True, true, 0)),
        22 => Ok((Value::Null, true, 0)),
        23 => Ok((Value::Undefined, true, 0)),
        24 => {
            let v = take::<1>(data)?[0];
            if v < 32 {
                Err(Error::InvalidSimpleType(v))
            } else {
                Ok((Value::Simple(SimpleValue(v)), true, 1))
            }
        }
        25 => {
            let v = half::f16::from_be_bytes(take(data)?);
            Ok((Value::Float(v.into()), true, 2))
        }
        26 => {
            let v = f32::from_be_bytes(take(data)?) as f64;
            let shortest = !v.is_nan() && lossless_float_coerce::<half::f16>(v).is_none();
            Ok((Value::Float(v), shortest, 4))
        }
        27 => {
            let v = f64::from_be_bytes(take(data)?);
            let shortest = !v.is_nan()
                && lossless_float_coerce::<half::f16>(v).is_none()
                && lossless_float_coerce::<f32>(v).is_none();
            Ok((Value::Float(v), shortest, 8))
        }
        31 => Err(Error::IndefiniteLength),
        _ => Err(Error::InvalidMinorValue(minor)),
    }
}

/// Parses one item from the front of `data`.
/// Returns the item, whether it was canonically encoded, and its length.
fn parse_item(data: &[u8], max_recursion: usize) -> Result<(Value, bool, usize), Error> {
    let Some(&initial) = data.first() else {
        return Err(Error::NeedMoreData(1));
    };
    let (major, minor) = (initial >> 5, initial & 0x1F);

    if major == 7 {
        return parse_simple(minor, &data[1..]).map(|(v, s, len)| (v, s, len + 1));
    }
    if minor == 31 {
        return Err(match major {
            2..=5 => Error::IndefiniteLength,
            _ => Error::InvalidMinorValue(minor),
        });
    }

    let (arg, mut shortest, len) = parse_uint_minor(minor, &data[1..])?;
    let mut offset = len + 1;
    let value = match major {
        0 => Value::UnsignedInteger(arg),
        1 => Value::NegativeInteger(arg),
        2 => {
            let b = parse_data_minor(arg, &data[offset..])?;
            offset += b.len();
            Value::Bytes(b.to_vec())
        }
        3 => {
            let t = parse_data_minor(arg, &data[offset..])?;
            offset += t.len();
            Value::Text(String::from(core::str::from_utf8(t)?))
        }
        4 => {
            if max_recursion == 0 {
                return Err(Error::MaxRecursion);
            }
            // Don't trust the count for preallocation
            let mut items = Vec::new();
            for _ in 0..arg {
                let (item, s, len) = parse_item(&data[offset..], max_recursion - 1)?;
                shortest = shortest && s;
                offset += len;
                items.push(item);
            }
            Value::Array(items)
        }
        5 => {
            if max_recursion == 0 {
                return Err(Error::MaxRecursion);
            }
            let mut map = Map::new();
            let mut sorted = true;
            for _ in 0..arg {
                let (key, s1, len) = parse_item(&data[offset..], max_recursion - 1)?;
                offset += len;
                let (value, s2, len) = parse_item(&data[offset..], max_recursion - 1)?;
                offset += len;
                sorted = map
                    .push_decoded(key, value)
                    .ok_or(Error::DuplicateMapKey)?
                    && sorted;
                shortest = shortest && s1 && s2;
            }
            if !sorted {
                if !map.sort_unique() {
                    return Err(Error::DuplicateMapKey);
                }
                shortest = false;
            }
            Value::Map(map)
        }
        _ => {
            // Major type 6: a tag prefixing exactly one item
            if offset >= data.len() {
                return Err(Error::JustTags);
            }
            if max_recursion == 0 {
                return Err(Error::MaxRecursion);
            }
            let (item, s, len) = parse_item(&data[offset..], max_recursion - 1)?;
            shortest = shortest && s;
            offset += len;
            Value::Tagged(arg, Box::new(item))
        }
    };
    Ok((value, shortest, offset))
}

/// Parses the first item of `data`, if there is one, leaving any following bytes untouched.
/// Returns the item, whether it was canonically encoded, and its length.
pub fn try_parse_value(data: &[u8]) -> Result<Option<(Value, bool, usize)>, Error> {
    if data.is_empty() {
        Ok(None)
    } else {
        parse_item(data, MAX_RECURSION).map(Some)
    }
}

/// Parses `data` as exactly one item, nested at most `max_recursion` deep.
/// Returns the item and whether it was canonically encoded.
pub fn parse_with_depth(data: &[u8], max_recursion: usize) -> Result<(Value, bool), Error> {
    let (value, shortest, len) = parse_item(data, max_recursion)?;
    if len != data.len() {
        return Err(Error::AdditionalItems);
    }
    Ok((value, shortest))
}

/// Parses `data` as exactly one item, reporting whether it was canonically encoded.
pub fn parse_detail(data: &[u8]) -> Result<(Value, bool), Error> {
    parse_with_depth(data, MAX_RECURSION)
}

/// Parses `data` as exactly one item.
pub fn parse(data: &[u8]) -> Result<Value, Error> {
    parse_detail(data).map(|(v, _)| v)
}
