//! Owned Security Identifier value type.
//!
//! A [`Sid`] is the authority plus an ordered run of 32-bit sub-authorities.
//! It is an immutable value: built by [`Sid::try_new`], parsed from the
//! `S-1-…` string form, or derived from another SID via the RID operations.
//! Sub-authorities live inline (no heap allocation), so SIDs can be copied
//! and compared freely on hot paths.

use core::fmt::{self, Display};
use core::str::FromStr;

use arrayvec::ArrayVec;
use parsing::SidComponents;
pub use parsing::{InvalidSidFormat, MAX_SUBAUTHORITY_COUNT, MIN_SUBAUTHORITY_COUNT};

use crate::SidIdentifierAuthority;

pub(crate) type SubAuthorities = ArrayVec<u32, { MAX_SUBAUTHORITY_COUNT as usize }>;

/// An owned Security Identifier (SID).
///
/// Two SIDs are equal iff the authority and every sub-authority match in
/// order. The revision participates in equality as well; it is `1` for every
/// SID a directory ever stores.
///
/// # Examples
/// ```rust
/// use ds_security::Sid;
///
/// let admins: Sid = "S-1-5-32-544".parse().unwrap();
/// assert_eq!(admins.to_string(), "S-1-5-32-544");
/// assert_eq!(admins.sub_authorities(), &[32, 544]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sid {
    revision: u8,
    identifier_authority: SidIdentifierAuthority,
    sub_authority: SubAuthorities,
}

impl Sid {
    /// The SID revision every modern SID carries.
    pub const REVISION: u8 = 1;

    /// Creates a new `Sid` from parts, validating input.
    ///
    /// Returns `None` if `sub_authority` holds more than
    /// [`MAX_SUBAUTHORITY_COUNT`] entries.
    ///
    /// # Examples
    /// ```rust
    /// use ds_security::{Sid, SidIdentifierAuthority};
    ///
    /// let sid = Sid::try_new(SidIdentifierAuthority::NT_AUTHORITY, [32u32, 544u32]).unwrap();
    /// assert_eq!(sid.to_string(), "S-1-5-32-544");
    /// assert!(Sid::try_new(SidIdentifierAuthority::NT_AUTHORITY, [0u32; 16]).is_none());
    /// ```
    #[must_use]
    #[inline]
    pub fn try_new<I: Into<SidIdentifierAuthority>, S: AsRef<[u32]>>(
        identifier_authority: I,
        sub_authority: S,
    ) -> Option<Self> {
        let sub_authority = SubAuthorities::try_from(sub_authority.as_ref()).ok()?;
        Some(Self {
            revision: Self::REVISION,
            identifier_authority: identifier_authority.into(),
            sub_authority,
        })
    }

    /// The SID revision value.
    #[must_use]
    #[inline]
    pub const fn revision(&self) -> u8 {
        self.revision
    }

    /// The identifier authority.
    #[must_use]
    #[inline]
    pub const fn identifier_authority(&self) -> SidIdentifierAuthority {
        self.identifier_authority
    }

    /// The ordered sub-authorities.
    #[must_use]
    #[inline]
    pub fn sub_authorities(&self) -> &[u32] {
        self.sub_authority.as_slice()
    }

    /// Whether `self` lies in the domain identified by `domain`: same
    /// authority, and every sub-authority of `domain` matches the leading
    /// sub-authorities of `self`.
    ///
    /// A SID is in its own domain; the test is a prefix-extension, not a
    /// strict one.
    ///
    /// # Examples
    /// ```rust
    /// use ds_security::Sid;
    ///
    /// let domain: Sid = "S-1-5-21-100-200-300".parse().unwrap();
    /// let user: Sid = "S-1-5-21-100-200-300-1104".parse().unwrap();
    /// let outsider: Sid = "S-1-5-21-100-200-999-1104".parse().unwrap();
    /// assert!(user.is_in_domain(&domain));
    /// assert!(domain.is_in_domain(&domain));
    /// assert!(!outsider.is_in_domain(&domain));
    /// ```
    #[must_use]
    #[inline]
    pub fn is_in_domain(&self, domain: &Self) -> bool {
        self.revision == domain.revision
            && self.identifier_authority == domain.identifier_authority
            && self.sub_authority.len() >= domain.sub_authority.len()
            && self
                .sub_authority
                .iter()
                .zip(domain.sub_authority.iter())
                .all(|(a, b)| a == b)
    }

    /// Returns a new SID with `rid` appended as one more sub-authority.
    ///
    /// `None` only when `self` already carries the maximum of
    /// [`MAX_SUBAUTHORITY_COUNT`] sub-authorities.
    #[must_use]
    #[inline]
    pub fn append_rid(&self, rid: u32) -> Option<Self> {
        let mut sid = self.clone();
        sid.sub_authority.try_push(rid).ok()?;
        Some(sid)
    }

    /// Splits the trailing RID off, returning the containing domain SID and
    /// the RID. `None` when there is no sub-authority to split.
    ///
    /// Inverse of [`Sid::append_rid`]:
    /// ```rust
    /// use ds_security::Sid;
    ///
    /// let domain: Sid = "S-1-5-21-100-200-300".parse().unwrap();
    /// let user = domain.append_rid(512).unwrap();
    /// assert_eq!(user.split_rid(), Some((domain, 512)));
    /// ```
    #[must_use]
    #[inline]
    pub fn split_rid(&self) -> Option<(Self, u32)> {
        let mut domain = self.clone();
        let rid = domain.sub_authority.pop()?;
        Some((domain, rid))
    }
}

impl From<SidComponents> for Sid {
    #[inline]
    fn from(components: SidComponents) -> Self {
        Self {
            revision: components.revision,
            identifier_authority: components.identifier_authority.into(),
            sub_authority: components.sub_authority,
        }
    }
}

impl FromStr for Sid {
    type Err = InvalidSidFormat;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SidComponents::from_str(s).map(Self::from)
    }
}

/// Shared by the [`Display`] impls of [`Sid`] and [`crate::ConstSid`].
pub(crate) fn fmt_sid(
    revision: u8,
    identifier_authority: SidIdentifierAuthority,
    sub_authorities: &[u32],
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "S-{revision}")?;

    // Identifier authority: decimal when it fits in u32, hex above that.
    let id_auth_value = identifier_authority.as_u64();
    if id_auth_value <= u64::from(u32::MAX) {
        write!(f, "-{id_auth_value}")?;
    } else {
        write!(f, "-0x{id_auth_value:X}")?;
    }

    for &sub_auth in sub_authorities {
        write!(f, "-{sub_auth}")?;
    }
    Ok(())
}

impl Display for Sid {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_sid(
            self.revision,
            self.identifier_authority,
            self.sub_authorities(),
            f,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
#[allow(clippy::expect_used, reason = "Expect is not an issue in test")]
pub(crate) mod test {
    use super::*;
    use crate::sid_identifier_authority::test::arb_identifier_authority;
    use proptest::prelude::*;

    pub fn arb_sid() -> impl Strategy<Value = Sid> {
        (
            arb_identifier_authority(),
            proptest::collection::vec(any::<u32>(), 0..=15),
        )
            .prop_map(|(identifier_authority, sub_authorities)| {
                Sid::try_new(identifier_authority, sub_authorities.as_slice())
                    .expect("failed to generate Sid")
            })
    }

    proptest! {
        #[test]
        fn sid_display_round_trip(sid in arb_sid()) {
            let display = sid.to_string();
            prop_assert!(display.starts_with("S-1-"), "Display does not start with S-1-: {}", display);

            let dash_count = display.matches('-').count();
            let expected = sid.sub_authorities().len() + 2;
            prop_assert_eq!(dash_count, expected, "Dash count {} vs sub-authority count {}", dash_count, expected);
            prop_assert_eq!(display.parse::<Sid>().unwrap(), sid);
        }

        #[test]
        fn sid_eq_is_symmetric_and_reflexive(a in arb_sid(), b in arb_sid()) {
            prop_assert_eq!(&a, &a);
            prop_assert_eq!(a == b, b == a);
        }

        #[test]
        fn split_undoes_append(domain in arb_sid(), rid in any::<u32>()) {
            prop_assume!(domain.sub_authorities().len() < MAX_SUBAUTHORITY_COUNT as usize);
            let child = domain.append_rid(rid).unwrap();
            prop_assert_eq!(child.split_rid(), Some((domain, rid)));
        }

        #[test]
        fn appended_rid_stays_in_domain(domain in arb_sid(), rid in any::<u32>()) {
            prop_assume!(domain.sub_authorities().len() < MAX_SUBAUTHORITY_COUNT as usize);
            let child = domain.append_rid(rid).unwrap();
            prop_assert!(child.is_in_domain(&domain));
            prop_assert!(!child.sub_authorities().is_empty());
        }
    }

    #[test]
    fn append_rid_refuses_overflow() {
        let full: Sid = "S-1-5-1-2-3-4-5-6-7-8-9-10-11-12-13-14-15".parse().unwrap();
        assert!(full.append_rid(16).is_none());
    }

    #[test]
    fn split_rid_needs_a_sub_authority() {
        let bare: Sid = "S-1-5".parse().unwrap();
        assert_eq!(bare.split_rid(), None);
    }

    #[test]
    fn domain_test_requires_matching_authority() {
        let domain: Sid = "S-1-5-21-1-2-3".parse().unwrap();
        let other_authority: Sid = "S-1-3-21-1-2-3-500".parse().unwrap();
        assert!(!other_authority.is_in_domain(&domain));
    }

    #[test]
    fn hex_authority_round_trips() {
        let sid: Sid = "S-1-0x1200000000-44".parse().unwrap();
        assert_eq!(sid.to_string(), "S-1-0x1200000000-44");
    }
}
