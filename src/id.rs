#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, str};

use crate::encode;
use fstr::FStr;

/// Represents a Universally Unique IDentifier as its two 64-bit halves.
///
/// For a UUIDv7, the `high` half holds the 48-bit `unix_ts_ms`, the 4-bit `ver`, and the 12-bit
/// sequence; the `low` half holds the 2-bit `var` and 62 random bits. The derived ordering
/// compares `high` first, so UUIDs sort by creation time.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid {
    high: u64,
    low: u64,
}

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self::from_halves(0, 0);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self::from_halves(u64::MAX, u64::MAX);

    /// Creates an object from the most significant and least significant 64 bits.
    pub const fn from_halves(high: u64, low: u64) -> Self {
        Self { high, low }
    }

    /// Creates a UUIDv7 object from field values.
    ///
    /// # Panics
    ///
    /// Panics if any argument is out of its field range: 48 bits for `unix_ts_ms`, 12 bits for
    /// `sequence`, and 62 bits for `rand_b`.
    pub const fn from_fields_v7(unix_ts_ms: u64, sequence: u16, rand_b: u64) -> Self {
        if unix_ts_ms >= 1 << 48 || sequence >= 1 << 12 || rand_b >= 1 << 62 {
            panic!("invalid field value");
        }

        Self::from_halves(
            (unix_ts_ms << 16) | 0x7000 | sequence as u64,
            0x8000_0000_0000_0000 | rand_b,
        )
    }

    /// Returns the most significant 64 bits.
    pub const fn high(&self) -> u64 {
        self.high
    }

    /// Returns the least significant 64 bits.
    pub const fn low(&self) -> u64 {
        self.low
    }

    /// Returns the 128-bit unsigned integer representation.
    pub const fn as_u128(&self) -> u128 {
        ((self.high as u128) << 64) | self.low as u128
    }

    /// Returns the 16-byte big-endian representation.
    pub const fn to_bytes(&self) -> [u8; 16] {
        self.as_u128().to_be_bytes()
    }

    /// Returns the 48-bit `unix_ts_ms` field of a UUIDv7.
    pub const fn timestamp(&self) -> u64 {
        self.high >> 16
    }

    /// Returns the 12-bit sequence field of a UUIDv7.
    pub const fn sequence(&self) -> u16 {
        (self.high & 0xfff) as u16
    }

    /// Reports the variant field value of the UUID or, if appropriate, "NIL" or "MAX".
    ///
    /// For convenience, this method reports [`Variant::Nil`] or [`Variant::Max`] if `self`
    /// represents the Nil or Max UUID, although the Nil and Max UUIDs are technically subsumed
    /// under the variants `0b0` and `0b111`, respectively.
    pub const fn variant(&self) -> Variant {
        match self.low >> 60 {
            0b0000..=0b0111 if self.high == 0 && self.low == 0 => Variant::Nil,
            0b0000..=0b0111 => Variant::Var0,
            0b1000..=0b1011 => Variant::Var10,
            0b1100..=0b1101 => Variant::Var110,
            _ if self.high == u64::MAX && self.low == u64::MAX => Variant::Max,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID or `None` if `self` does not have the variant
    /// field value of `0b10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(((self.high >> 12) & 0xf) as u8),
            _ => None,
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use atomic_uuid7::Uuid;
    ///
    /// let x = "017f21a3-c4a0-7123-9abc-def012345678".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "017f21a3-c4a0-7123-9abc-def012345678");
    /// assert_eq!(format!("{}", y), "017f21a3-c4a0-7123-9abc-def012345678");
    /// # Ok::<(), atomic_uuid7::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        encode::encode(self.high, self.low)
    }
}

/// The reserved variants of UUIDs.
///
/// # Examples
///
/// ```rust
/// use atomic_uuid7::{Uuid, Variant};
///
/// assert_eq!(Uuid::NIL.variant(), Variant::Nil);
/// assert_eq!(atomic_uuid7::uuid7().variant(), Variant::Var10);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// The variant `0b0` (reserved for NCS compatibility).
    Var0,

    /// The variant `0b10` used by UUIDv7 and other RFC 9562 versions.
    Var10,

    /// The variant `0b110` (reserved for Microsoft compatibility).
    Var110,

    /// The variant `0b111` (reserved for future definition).
    VarReserved,

    /// The Nil UUID.
    Nil,

    /// The Max UUID.
    Max,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = [0u8; encode::ENCODED_LEN];
        f.write_str(encode::encode_into(self.high, self.low, &mut buffer))
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = 0u128;
        let mut iter = src.chars();
        for i in 0..32 {
            if (i == 8 || i == 12 || i == 16 || i == 20) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
            let digit = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)?;
            dst = (dst << 4) | digit as u128;
        }
        if iter.next().is_none() {
            Ok(Self::from(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        src.as_u128()
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self::from_halves((src >> 64) as u64, src as u64)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.to_bytes()
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self::from(u128::from_be_bytes(src))
    }
}

impl From<Uuid> for (u64, u64) {
    fn from(src: Uuid) -> Self {
        (src.high, src.low)
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            crate::encode::format_identifier(src.high, src.low)
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_u128(src.as_u128())
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self::from(src.as_u128())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(&self.to_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{Uuid, Variant};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u64, u16, u64), &'static str)] {
        const MAX_UINT48: u64 = (1 << 48) - 1;
        const MAX_UINT12: u16 = (1 << 12) - 1;
        const MAX_UINT62: u64 = (1 << 62) - 1;

        &[
            ((0, 0, 0), "00000000-0000-7000-8000-000000000000"),
            ((MAX_UINT48, 0, 0), "ffffffff-ffff-7000-8000-000000000000"),
            ((0, MAX_UINT12, 0), "00000000-0000-7fff-8000-000000000000"),
            ((0, 0, MAX_UINT62), "00000000-0000-7000-bfff-ffffffffffff"),
            (
                (MAX_UINT48, MAX_UINT12, MAX_UINT62),
                "ffffffff-ffff-7fff-bfff-ffffffffffff",
            ),
            (
                (0x17f21a3c4a0, 0x123, 0x1abcdef012345678),
                "017f21a3-c4a0-7123-9abc-def012345678",
            ),
            (
                (0x17f22e279b0, 0xcc3, 0x18c4dc0c0c07398f),
                "017f22e2-79b0-7cc3-98c4-dc0c0c07398f",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (fs, text) in prepare_cases() {
            let from_fields = Uuid::from_fields_v7(fs.0, fs.1, fs.2);
            assert_eq!(Ok(from_fields), text.parse());
            assert_eq!(Ok(from_fields), text.to_uppercase().parse());
            assert_eq!(&from_fields.encode() as &str, *text);
            assert_eq!(from_fields.timestamp(), fs.0);
            assert_eq!(from_fields.sequence(), fs.1);
            #[cfg(feature = "std")]
            assert_eq!(&from_fields.to_string(), text);
            #[cfg(feature = "std")]
            assert_eq!(&String::from(from_fields), text);
            #[cfg(all(feature = "std", feature = "uuid"))]
            assert_eq!(&uuid::Uuid::from(from_fields).to_string(), text);
        }
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " 0180a8f0-5b82-75b4-9fef-ecad657c30bb",
            "0180a8f0-5b84-7438-ab50-f0626f78002b ",
            " 0180a8f0-5b84-7438-ab50-f063bd5331af ",
            "+0180a8f0-5b84-7438-ab50-f06405d35edb",
            "-0180a8f0-5b84-7438-ab50-f06508df4c2d",
            "+180a8f0-5b84-7438-ab50-f066aa10a367",
            "-180a8f0-5b84-7438-ab50-f067cdce1d69",
            "0180a8f05b847438ab50f068decfbfd7",
            "0180a8f0-5b847438-ab50-f06991838802",
            "{0180a8f0-5b84-7438-ab50-f06ac2e5e082}",
            "0180a8f0-5b84-74 8-ab50-f06bed27bdc7",
            "0180a8g0-5b84-7438-ab50-f06c91175b8a",
            "0180a8f0-5b84-7438-ab50_f06d3ea24429",
            "0180a8f0-5b84-7438-ab50-f06d3ea2442",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err());
        }
    }

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(
            &Uuid::NIL.encode() as &str,
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(Uuid::NIL.variant(), Variant::Nil);
        assert_eq!(Uuid::NIL.version(), None);

        assert_eq!(
            &Uuid::MAX.encode() as &str,
            "ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
        assert_eq!(Uuid::MAX.variant(), Variant::Max);
        assert_eq!(Uuid::MAX.version(), None);
    }

    /// Reports variant and version fields
    #[test]
    fn reports_variant_and_version_fields() {
        let cases = [
            ((0x0000_0000_0000_4000, 0x0000_0000_0000_0001), Variant::Var0),
            ((0x0000_0000_0000_4000, 0x7fff_ffff_ffff_ffff), Variant::Var0),
            ((0x0000_0000_0000_4000, 0x8000_0000_0000_0000), Variant::Var10),
            ((0x0000_0000_0000_4000, 0xbfff_ffff_ffff_ffff), Variant::Var10),
            ((0x0000_0000_0000_4000, 0xc000_0000_0000_0000), Variant::Var110),
            ((0x0000_0000_0000_4000, 0xdfff_ffff_ffff_ffff), Variant::Var110),
            ((0x0000_0000_0000_4000, 0xe000_0000_0000_0000), Variant::VarReserved),
            ((0x0000_0000_0000_4000, 0xffff_ffff_ffff_ffff), Variant::VarReserved),
        ];

        for ((high, low), variant) in cases {
            let e = Uuid::from_halves(high, low);
            assert_eq!(e.variant(), variant);
            let expected = if variant == Variant::Var10 { Some(4) } else { None };
            assert_eq!(e.version(), expected);
        }
    }

    /// Orders by high half first
    #[test]
    fn orders_by_high_half_first() {
        let a = Uuid::from_halves(1, u64::MAX);
        let b = Uuid::from_halves(2, 0);
        assert!(a < b);
        assert!(a.to_bytes() < b.to_bytes());
        assert!(u128::from(a) < u128::from(b));
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_fields_v7(fs.0, fs.1, fs.2);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            let (high, low) = <(u64, u64)>::from(e);
            assert_eq!(Uuid::from_halves(high, low), e);
            assert_eq!(e.encode().parse(), Ok(e));
            assert_eq!(e.encode().to_uppercase().parse(), Ok(e));
            #[cfg(feature = "std")]
            assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
            #[cfg(feature = "std")]
            assert_eq!(Uuid::try_from(e.to_string().to_uppercase()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);
            #[cfg(feature = "uuid")]
            assert_eq!(uuid::Uuid::from(e).as_bytes(), &<[u8; 16]>::from(e));
        }
    }

    /// Rejects out-of-range field values
    #[test]
    #[should_panic]
    fn rejects_out_of_range_field_values() {
        let _ = Uuid::from_fields_v7(1 << 48, 0, 0);
    }
}
