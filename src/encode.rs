//! Canonical 8-4-4-4-12 hexadecimal encoder.
//!
//! The encoder works directly on the two 64-bit halves of an identifier. Each half is split into
//! two 32-bit words and every word is emitted most significant nibble first through a fixed
//! position table, so no digit is written under a data-dependent branch.
//!
//! Three forms are provided:
//!
//! | Function              | Output               | Allocates |
//! | --------------------- | -------------------- | --------- |
//! | [`encode_into`]       | caller's `[u8; 36]`  | No        |
//! | [`encode`]            | [`FStr<36>`] value   | No        |
//! | [`format_identifier`] | `String`             | Yes       |

use fstr::FStr;

/// Length of the canonical string representation.
pub const ENCODED_LEN: usize = 36;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Output positions of the 32 hex digits; the remaining four positions hold hyphens.
const DIGIT_POS: [usize; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, // time_high
    9, 10, 11, 12, // time_mid
    14, 15, 16, 17, // ver + seq
    19, 20, 21, 22, // var + rand
    24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35,
];

/// Writes the canonical string representation of `(high, low)` into `buffer` and returns the
/// written text.
///
/// # Examples
///
/// ```rust
/// let mut buffer = [0u8; atomic_uuid7::encode::ENCODED_LEN];
/// let text = atomic_uuid7::encode::encode_into(0x017f21a3c4a07123, 0x9abcdef012345678, &mut buffer);
/// assert_eq!(text, "017f21a3-c4a0-7123-9abc-def012345678");
/// ```
pub fn encode_into(high: u64, low: u64, buffer: &mut [u8; ENCODED_LEN]) -> &str {
    let words = [(high >> 32) as u32, high as u32, (low >> 32) as u32, low as u32];

    for (i, word) in words.into_iter().enumerate() {
        for k in 0..8 {
            buffer[DIGIT_POS[i * 8 + k]] = DIGITS[((word >> (28 - 4 * k)) & 0xf) as usize];
        }
    }
    buffer[8] = b'-';
    buffer[13] = b'-';
    buffer[18] = b'-';
    buffer[23] = b'-';

    debug_assert!(buffer.is_ascii());
    // SAFETY: every byte is taken from `DIGITS` or is a hyphen
    unsafe { core::str::from_utf8_unchecked(buffer) }
}

/// Returns the canonical string representation of `(high, low)` in a stack-allocated value that
/// dereferences to `str` and implements [`Display`](core::fmt::Display).
pub fn encode(high: u64, low: u64) -> FStr<ENCODED_LEN> {
    let mut buffer = [0u8; ENCODED_LEN];
    encode_into(high, low, &mut buffer);
    // SAFETY: `encode_into` fills the buffer with ASCII code points only
    unsafe { FStr::from_inner_unchecked(buffer) }
}

/// Returns the canonical string representation of an identifier given as its two 64-bit halves.
///
/// This is usable independently of any generator, e.g., to re-format a stored identifier.
///
/// # Examples
///
/// ```rust
/// let text = atomic_uuid7::format_identifier(0x017f21a3c4a07123, 0x9abcdef012345678);
/// assert_eq!(text, "017f21a3-c4a0-7123-9abc-def012345678");
/// ```
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub fn format_identifier(high: u64, low: u64) -> String {
    let mut buffer = [0u8; ENCODED_LEN];
    encode_into(high, low, &mut buffer).to_owned()
}

#[cfg(test)]
mod tests {
    use super::{encode, encode_into, ENCODED_LEN};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u64, u64), &'static str)] {
        &[
            ((0, 0), "00000000-0000-0000-0000-000000000000"),
            ((u64::MAX, u64::MAX), "ffffffff-ffff-ffff-ffff-ffffffffffff"),
            (
                (0x017f21a3c4a07123, 0x9abcdef012345678),
                "017f21a3-c4a0-7123-9abc-def012345678",
            ),
            (
                (0x017f22e279b07cc3, 0x98c4dc0c0c07398f),
                "017f22e2-79b0-7cc3-98c4-dc0c0c07398f",
            ),
            (
                (0x0123456789abcdef, 0xfedcba9876543210),
                "01234567-89ab-cdef-fedc-ba9876543210",
            ),
            ((1, 1), "00000000-0000-0001-0000-000000000001"),
        ]
    }

    /// Encodes prepared cases correctly
    #[test]
    fn encodes_prepared_cases_correctly() {
        for &((high, low), text) in prepare_cases() {
            let mut buffer = [0u8; ENCODED_LEN];
            assert_eq!(encode_into(high, low, &mut buffer), text);
            assert_eq!(&encode(high, low) as &str, text);
            #[cfg(feature = "std")]
            assert_eq!(super::format_identifier(high, low), text);
        }
    }

    /// Overwrites a reused buffer completely
    #[test]
    fn overwrites_reused_buffer_completely() {
        let mut buffer = [b'x'; ENCODED_LEN];
        for &((high, low), text) in prepare_cases() {
            assert_eq!(encode_into(high, low, &mut buffer), text);
        }
    }

    /// Produces strings parsable by an external UUID parser
    #[test]
    fn produces_strings_parsable_by_external_uuid_parser() {
        use rand::Rng;

        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        let mut rng = rand::thread_rng();
        let mut buffer = [0u8; ENCODED_LEN];
        for _ in 0..10_000 {
            let (high, low): (u64, u64) = (rng.gen(), rng.gen());
            let text = encode_into(high, low, &mut buffer);
            assert!(re.is_match(text));
            for i in [8, 13, 18, 23] {
                assert_eq!(text.as_bytes()[i], b'-');
            }

            let parsed = uuid::Uuid::parse_str(text).unwrap();
            assert_eq!(parsed.as_u128(), (u128::from(high) << 64) | u128::from(low));
        }
    }
}
