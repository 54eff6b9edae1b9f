use super::value::{Map, SimpleValue, Value};
use alloc::{string::String, vec::Vec};

pub trait ToCbor {
    fn to_cbor(&self, encoder: &mut Encoder);
}

pub struct Encoder {
    data: Vec<u8>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }

    fn emit_uint_minor(&mut self, major: u8, val: u64) {
        if val < 24 {
            self.data.push((major << 5) | (val as u8))
        } else if val <= u8::MAX as u64 {
            self.data.push((major << 5) | 24u8);
            self.data.push(val as u8)
        } else if val <= u16::MAX as u64 {
            self.data.push((major << 5) | 25u8);
            self.data.extend((val as u16).to_be_bytes())
        } else if val <= u32::MAX as u64 {
            self.data.push((major << 5) | 26u8);
            self.data.extend((val as u32).to_be_bytes())
        } else {
            self.data.push((major << 5) | 27u8);
            self.data.extend(val.to_be_bytes())
        }
    }

    pub fn emit<T>(&mut self, value: &T)
    where
        T: ToCbor + ?Sized,
    {
        value.to_cbor(self)
    }

    pub fn emit_tag(&mut self, tag: u64) {
        self.emit_uint_minor(6, tag)
    }

    pub fn emit_tagged<T>(&mut self, value: &T, tag: u64)
    where
        T: ToCbor + ?Sized,
    {
        self.emit_tag(tag);
        self.emit(value)
    }

    pub fn emit_null(&mut self) {
        self.data.push((7 << 5) | 22)
    }

    pub fn emit_undefined(&mut self) {
        self.data.push((7 << 5) | 23)
    }

    pub fn emit_simple(&mut self, value: SimpleValue) {
        let value = value.get();
        if value < 24 {
            self.data.push((7 << 5) | value)
        } else {
            self.data.push((7 << 5) | 24);
            self.data.push(value)
        }
    }

    pub fn emit_array<F>(&mut self, count: usize, f: F)
    where
        F: FnOnce(&mut Array),
    {
        let mut a = Array::new(self, count);
        f(&mut a);
        a.end()
    }

    pub fn emit_map<F>(&mut self, count: usize, f: F)
    where
        F: FnOnce(&mut MapEncoder),
    {
        let mut m = MapEncoder::new(self, count);
        f(&mut m);
        m.end()
    }
}

/// A definite-length array (`D == 1`) or map (`D == 2`) under construction.
pub struct Sequence<'a, const D: usize> {
    encoder: &'a mut Encoder,
    count: usize,
    idx: usize,
}

pub type Array<'a> = Sequence<'a, 1>;
pub type MapEncoder<'a> = Sequence<'a, 2>;

impl<'a, const D: usize> Sequence<'a, D> {
    fn new(encoder: &'a mut Encoder, count: usize) -> Self {
        encoder.emit_uint_minor(if D == 1 { 4 } else { 5 }, count as u64);
        Self {
            encoder,
            count: count * D,
            idx: 0,
        }
    }

    fn next_field(&mut self) -> &mut Encoder {
        self.idx += 1;
        if self.idx > self.count {
            panic!("Too many items added to definite length sequence")
        }
        self.encoder
    }

    fn end(self) {
        if self.idx != self.count {
            panic!(
                "Definite length sequence is short of items: {}, expected {}",
                self.idx, self.count
            );
        }
    }

    pub fn emit<T>(&mut self, value: &T)
    where
        T: ToCbor + ?Sized,
    {
        self.next_field().emit(value)
    }

    pub fn emit_tagged<T>(&mut self, value: &T, tag: u64)
    where
        T: ToCbor + ?Sized,
    {
        self.next_field().emit_tagged(value, tag)
    }

    pub fn emit_null(&mut self) {
        self.next_field().emit_null()
    }

    pub fn emit_array<F>(&mut self, count: usize, f: F)
    where
        F: FnOnce(&mut Array),
    {
        self.next_field().emit_array(count, f)
    }

    pub fn emit_map<F>(&mut self, count: usize, f: F)
    where
        F: FnOnce(&mut MapEncoder),
    {
        self.next_field().emit_map(count, f)
    }
}

macro_rules! impl_uint_to_cbor {
    ($($ty:ty),*) => {
        $(
            impl ToCbor for $ty {
                fn to_cbor(&self, encoder: &mut Encoder) {
                    encoder.emit_uint_minor(0, *self as u64);
                }
            }
        )*
    };
}

impl_uint_to_cbor!(u8, u16, u32, u64, usize);

fn emit_i64(encoder: &mut Encoder, val: i64) {
    if val >= 0 {
        encoder.emit_uint_minor(0, val as u64);
    } else {
        encoder.emit_uint_minor(1, (-1 - val) as u64);
    }
}

macro_rules! impl_int_to_cbor {
    ($($ty:ty),*) => {
        $(
            impl ToCbor for $ty {
                fn to_cbor(&self, encoder: &mut Encoder) {
                    emit_i64(encoder, *self as i64)
                }
            }
        )*
    };
}

impl_int_to_cbor!(i8, i16, i32, i64, isize);

pub(crate) fn lossless_float_coerce<T>(value: f64) -> Option<T>
where
    T: num_traits::FromPrimitive + Into<f64> + Copy,
{
    match <T as num_traits::FromPrimitive>::from_f64(value) {
        Some(f) if <T as Into<f64>>::into(f) == value => Some(f),
        _ => None,
    }
}

impl ToCbor for f64 {
    fn to_cbor(&self, encoder: &mut Encoder) {
        if self.is_nan() {
            // Canonical NaN is the half-precision quiet NaN
            encoder.data.push((7 << 5) | 25);
            encoder.data.extend(half::f16::NAN.to_be_bytes())
        } else if let Some(f) = lossless_float_coerce::<half::f16>(*self) {
            encoder.data.push((7 << 5) | 25);
            encoder.data.extend(f.to_be_bytes())
        } else if let Some(f) = lossless_float_coerce::<f32>(*self) {
            encoder.data.push((7 << 5) | 26);
            encoder.data.extend(f.to_be_bytes())
        } else {
            encoder.data.push((7 << 5) | 27);
            encoder.data.extend(self.to_be_bytes())
        }
    }
}

impl ToCbor for f32 {
    fn to_cbor(&self, encoder: &mut Encoder) {
        (*self as f64).to_cbor(encoder)
    }
}

impl ToCbor for bool {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.data.push((7 << 5) | if *self { 21 } else { 20 })
    }
}

impl ToCbor for str {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_uint_minor(3, self.len() as u64);
        encoder.data.extend_from_slice(self.as_bytes())
    }
}

impl ToCbor for String {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_str().to_cbor(encoder)
    }
}

impl ToCbor for [u8] {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_uint_minor(2, self.len() as u64);
        encoder.data.extend_from_slice(self)
    }
}

impl ToCbor for Vec<u8> {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_slice().to_cbor(encoder)
    }
}

impl<const N: usize> ToCbor for [u8; N] {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_slice().to_cbor(encoder)
    }
}

impl<T> ToCbor for Option<T>
where
    T: ToCbor,
{
    fn to_cbor(&self, encoder: &mut Encoder) {
        match self {
            Some(value) => encoder.emit(value),
            None => encoder.emit_null(),
        }
    }
}

impl ToCbor for Map {
    fn to_cbor(&self, encoder: &mut Encoder) {
        // Entries are held in canonical key order
        encoder.emit_map(self.len(), |m| {
            for (key, value) in self.iter() {
                m.emit(key);
                m.emit(value);
            }
        })
    }
}

impl ToCbor for Value {
    fn to_cbor(&self, encoder: &mut Encoder) {
        match self {
            Value::UnsignedInteger(v) => encoder.emit_uint_minor(0, *v),
            Value::NegativeInteger(v) => encoder.emit_uint_minor(1, *v),
            Value::Bytes(v) => encoder.emit(v.as_slice()),
            Value::Text(v) => encoder.emit(v.as_str()),
            Value::Array(items) => encoder.emit_array(items.len(), |a| {
                for item in items {
                    a.emit(item);
                }
            }),
            Value::Map(m) => encoder.emit(m),
            Value::Tagged(tag, v) => encoder.emit_tagged(v.as_ref(), *tag),
            Value::False => encoder.emit(&false),
            Value::True => encoder.emit(&true),
            Value::Null => encoder.emit_null(),
            Value::Undefined => encoder.emit_undefined(),
            Value::Simple(v) => encoder.emit_simple(*v),
            Value::Float(v) => encoder.emit(v),
        }
    }
}

pub fn emit<T>(value: &T) -> Vec<u8>
where
    T: ToCbor + ?Sized,
{
    let mut e = Encoder::new();
    e.emit(value);
    e.build()
}

pub fn emit_tagged<T>(value: &T, tag: u64) -> Vec<u8>
where
    T: ToCbor + ?Sized,
{
    let mut e = Encoder::new();
    e.emit_tagged(value, tag);
    e.build()
}

pub fn emit_array<F>(count: usize, f: F) -> Vec<u8>
where
    F: FnOnce(&mut Array),
{
    let mut e = Encoder::new();
    e.emit_array(count, f);
    e.build()
}

pub fn emit_map<F>(count: usize, f: F) -> Vec<u8>
where
    F: FnOnce(&mut MapEncoder),
{
    let mut e = Encoder::new();
    e.emit_map(count, f);
    e.build()
}
