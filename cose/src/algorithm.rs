use super::*;

/// Algorithm identifiers from the IANA "COSE Algorithms" registry.
///
/// The codec treats these as opaque labels; nothing here implements them.
/// Equality and hashing follow the identifier, so `Unrecognised(5)` equals
/// `HMAC_256_256`. `From<i64>` always yields the named variant.
#[allow(non_camel_case_types)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy)]
pub enum Algorithm {
    ES256,
    ES384,
    ES512,
    EdDSA,
    PS256,
    #[cfg_attr(feature = "serde", serde(rename = "HMAC 256/64"))]
    HMAC_256_64,
    #[cfg_attr(feature = "serde", serde(rename = "HMAC 256/256"))]
    HMAC_256_256,
    #[cfg_attr(feature = "serde", serde(rename = "HMAC 384/384"))]
    HMAC_384_384,
    #[cfg_attr(feature = "serde", serde(rename = "HMAC 512/512"))]
    HMAC_512_512,
    A128GCM,
    A192GCM,
    A256GCM,
    #[cfg_attr(feature = "serde", serde(rename = "direct"))]
    Direct,
    A128KW,
    A192KW,
    A256KW,
    Unrecognised(i64),
}

impl From<i64> for Algorithm {
    fn from(value: i64) -> Self {
        match value {
            -7 => Self::ES256,
            -35 => Self::ES384,
            -36 => Self::ES512,
            -8 => Self::EdDSA,
            -37 => Self::PS256,
            4 => Self::HMAC_256_64,
            5 => Self::HMAC_256_256,
            6 => Self::HMAC_384_384,
            7 => Self::HMAC_512_512,
            1 => Self::A128GCM,
            2 => Self::A192GCM,
            3 => Self::A256GCM,
            -6 => Self::Direct,
            -3 => Self::A128KW,
            -4 => Self::A192KW,
            -5 => Self::A256KW,
            value => Self::Unrecognised(value),
        }
    }
}

impl From<Algorithm> for i64 {
    fn from(value: Algorithm) -> Self {
        match value {
            Algorithm::ES256 => -7,
            Algorithm::ES384 => -35,
            Algorithm::ES512 => -36,
            Algorithm::EdDSA => -8,
            Algorithm::PS256 => -37,
            Algorithm::HMAC_256_64 => 4,
            Algorithm::HMAC_256_256 => 5,
            Algorithm::HMAC_384_384 => 6,
            Algorithm::HMAC_512_512 => 7,
            Algorithm::A128GCM => 1,
            Algorithm::A192GCM => 2,
            Algorithm::A256GCM => 3,
            Algorithm::Direct => -6,
            Algorithm::A128KW => -3,
            Algorithm::A192KW => -4,
            Algorithm::A256KW => -5,
            Algorithm::Unrecognised(value) => value,
        }
    }
}

impl PartialEq for Algorithm {
    fn eq(&self, other: &Self) -> bool {
        i64::from(*self) == i64::from(*other)
    }
}

impl Eq for Algorithm {}

impl core::hash::Hash for Algorithm {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        i64::from(*self).hash(state)
    }
}

impl From<Algorithm> for Value {
    fn from(value: Algorithm) -> Self {
        i64::from(value).into()
    }
}

impl cbor::encode::ToCbor for Algorithm {
    fn to_cbor(&self, encoder: &mut cbor::encode::Encoder) {
        encoder.emit(&i64::from(*self))
    }
}

impl core::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unrecognised(value) => write!(f, "Unrecognised algorithm {value}"),
            Self::HMAC_256_64 => write!(f, "HMAC 256/64"),
            Self::HMAC_256_256 => write!(f, "HMAC 256/256"),
            Self::HMAC_384_384 => write!(f, "HMAC 384/384"),
            Self::HMAC_512_512 => write!(f, "HMAC 512/512"),
            Self::Direct => write!(f, "direct"),
            _ => write!(f, "{self:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids() {
        for id in -40..=10 {
            assert_eq!(id, i64::from(Algorithm::from(id)));
        }
        assert_eq!(Algorithm::ES256, Algorithm::from(-7));
        assert_eq!(Algorithm::Direct, Algorithm::from(-6));
        assert_eq!(Algorithm::HMAC_256_256, Algorithm::from(5));
        assert_eq!(Algorithm::Unrecognised(-65535), Algorithm::from(-65535));
        assert_eq!(Value::NegativeInteger(6), Value::from(Algorithm::ES256));
        assert_eq!(cbor::encode::emit(&Algorithm::Direct), [0x25]);
    }

    #[test]
    fn equality_by_id() {
        assert_eq!(Algorithm::Unrecognised(5), Algorithm::HMAC_256_256);
        assert_eq!(Algorithm::Unrecognised(-7), Algorithm::ES256);
        assert_ne!(Algorithm::Unrecognised(-7), Algorithm::ES384);
        assert!(matches!(
            Algorithm::from(i64::from(Algorithm::Unrecognised(5))),
            Algorithm::HMAC_256_256
        ));

        let set = [Algorithm::Unrecognised(-6), Algorithm::Direct]
            .into_iter()
            .collect::<std::collections::HashSet<_>>();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn names() {
        assert_eq!("ES256", Algorithm::ES256.to_string());
        assert_eq!("HMAC 256/256", Algorithm::HMAC_256_256.to_string());
        assert_eq!("Unrecognised algorithm 99", Algorithm::from(99).to_string());
    }

    #[test]
    fn serde() {
        assert_eq!(
            "\"HMAC 256/256\"",
            serde_json::to_string(&Algorithm::HMAC_256_256).unwrap()
        );
        assert_eq!(
            Algorithm::Direct,
            serde_json::from_str::<Algorithm>("\"direct\"").unwrap()
        );
        assert_eq!(
            Algorithm::A128GCM,
            serde_json::from_str::<Algorithm>("\"A128GCM\"").unwrap()
        );
        assert_eq!(
            Algorithm::Unrecognised(-65535),
            serde_json::from_str::<Algorithm>("{\"Unrecognised\":-65535}").unwrap()
        );
    }
}
