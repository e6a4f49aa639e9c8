//! Textual SID parsing for the `ds-security` workspace.
//!
//! Splitting the string form out keeps the parser `no_std`-friendly and lets
//! the main crate validate trustee strings without dragging the whole
//! security model along.

#![cfg_attr(not(feature = "std"), no_std)]

use core::fmt::{self, Display};
use core::str::FromStr;

use arrayvec::ArrayVec;
use thiserror::Error;

/// Smallest legal number of sub-authorities. Authority-only SIDs such as
/// `S-1-5` occur in directory data and must parse.
pub const MIN_SUBAUTHORITY_COUNT: u8 = 0;

/// Largest legal number of sub-authorities in a SID.
pub const MAX_SUBAUTHORITY_COUNT: u8 = 15;

/// The identifier authority is a 48-bit quantity.
const MAX_AUTHORITY: u64 = (1 << 48) - 1;

/// The components of a SID in its `S-R-I-S…` string form.
pub struct SidComponents {
    /// The SID revision value, generally 1.
    pub revision: u8,
    /// The SID identifier authority value, big-endian.
    pub identifier_authority: [u8; 6],
    /// The SID sub-authority values.
    pub sub_authority: ArrayVec<u32, { MAX_SUBAUTHORITY_COUNT as usize }>,
}

/// Error type returned when parsing a SID string fails due to an invalid format.
///
/// This is used by `FromStr` on the SID types of the main crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub struct InvalidSidFormat;

impl Display for InvalidSidFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invalid format for Sid")
    }
}

impl FromStr for SidComponents {
    type Err = InvalidSidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut s_cmp = s.split('-');
        if !s_cmp
            .next()
            .map(|head| head.eq_ignore_ascii_case("s"))
            .unwrap_or(false)
        {
            return Err(InvalidSidFormat);
        }
        let revision = s_cmp
            .next()
            .ok_or(InvalidSidFormat)?
            .parse::<u8>()
            .map_err(|_| InvalidSidFormat)?;

        let identifier_authority = s_cmp
            .next()
            .ok_or(InvalidSidFormat)
            .and_then(parse_authority)
            .map(|value| {
                let [_, _, a, b, c, d, e, f] = value.to_be_bytes();
                [a, b, c, d, e, f]
            })?;

        let mut sub_authority = ArrayVec::new();
        for item in s_cmp {
            let item = item.parse::<u32>().map_err(|_| InvalidSidFormat)?;
            sub_authority.try_push(item).map_err(|_| InvalidSidFormat)?;
        }

        Ok(Self {
            revision,
            identifier_authority,
            sub_authority,
        })
    }
}

/// Authorities above `u32::MAX` are rendered in hex (`S-1-0x…`), so both
/// spellings are accepted to keep the textual form round-trippable.
fn parse_authority(part: &str) -> Result<u64, InvalidSidFormat> {
    let value = if let Some(hex) = part.strip_prefix("0x").or_else(|| part.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).map_err(|_| InvalidSidFormat)?
    } else {
        part.parse::<u64>().map_err(|_| InvalidSidFormat)?
    };
    if value > MAX_AUTHORITY {
        return Err(InvalidSidFormat);
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
mod tests {
    use super::*;

    #[test]
    fn parses_builtin_administrators() {
        let components = SidComponents::from_str("S-1-5-32-544").unwrap();
        assert_eq!(components.revision, 1);
        assert_eq!(components.identifier_authority, [0, 0, 0, 0, 0, 5]);
        assert_eq!(components.sub_authority.as_slice(), &[32, 544]);
    }

    #[test]
    fn head_is_case_insensitive() {
        assert!(SidComponents::from_str("s-1-5-18").is_ok());
    }

    #[test]
    fn authority_only_sid_is_legal() {
        let components = SidComponents::from_str("S-1-5").unwrap();
        assert!(components.sub_authority.is_empty());
    }

    #[test]
    fn accepts_hex_authority() {
        let components = SidComponents::from_str("S-1-0x1200000000-10").unwrap();
        assert_eq!(components.identifier_authority, [0x12, 0, 0, 0, 0, 0]);
        assert_eq!(components.sub_authority.as_slice(), &[10]);
    }

    #[test]
    fn rejects_authority_beyond_48_bits() {
        assert!(SidComponents::from_str("S-1-281474976710656").is_err());
        assert!(SidComponents::from_str("S-1-0x1000000000000").is_err());
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "S", "X-1-5", "S-1", "S--5", "S-1-5-", "S-1-5-abc"] {
            assert!(SidComponents::from_str(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_sixteen_sub_authorities() {
        let sid = "S-1-5-1-2-3-4-5-6-7-8-9-10-11-12-13-14-15-16";
        assert!(SidComponents::from_str(sid).is_err());
    }

    #[test]
    fn fifteen_sub_authorities_fit() {
        let sid = "S-1-5-1-2-3-4-5-6-7-8-9-10-11-12-13-14-15";
        let components = SidComponents::from_str(sid).unwrap();
        assert_eq!(components.sub_authority.len(), 15);
    }
}
