/// Identifier authority component of a SID (6-byte big-endian value).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SidIdentifierAuthority {
    /// Big-endian authority bytes.
    pub value: [u8; 6],
}

impl SidIdentifierAuthority {
    /// Null authority (`S-1-0`).
    pub const NULL_AUTHORITY: Self = Self::from_u64(0);
    /// World authority (`S-1-1`).
    pub const SECURITY_WORLD_AUTHORITY: Self = Self::from_u64(1);
    /// Local authority (`S-1-2`).
    pub const SECURITY_LOCAL_AUTHORITY: Self = Self::from_u64(2);
    /// Creator authority (`S-1-3`).
    pub const SECURITY_CREATOR_AUTHORITY: Self = Self::from_u64(3);
    /// NT authority (`S-1-5`), the one nearly every directory principal
    /// lives under.
    pub const NT_AUTHORITY: Self = Self::from_u64(5);

    /// Builds an authority from its numeric value.
    ///
    /// The value must fit in 48 bits; the upper 16 bits are discarded by the
    /// big-endian truncation, so callers pass canonical authority numbers.
    #[must_use]
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        let [_, _, a, b, c, d, e, f] = value.to_be_bytes();
        Self {
            value: [a, b, c, d, e, f],
        }
    }

    /// Numeric value of the authority.
    #[must_use]
    #[inline]
    pub const fn as_u64(self) -> u64 {
        let [a, b, c, d, e, f] = self.value;
        u64::from_be_bytes([0, 0, a, b, c, d, e, f])
    }
}

impl Default for SidIdentifierAuthority {
    #[inline]
    fn default() -> Self {
        Self::NULL_AUTHORITY
    }
}

impl From<[u8; 6]> for SidIdentifierAuthority {
    #[inline]
    fn from(value: [u8; 6]) -> Self {
        Self { value }
    }
}

impl From<SidIdentifierAuthority> for [u8; 6] {
    #[inline]
    fn from(value: SidIdentifierAuthority) -> Self {
        value.value
    }
}
