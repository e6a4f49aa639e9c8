use core::fmt::{self, Display};

use crate::sid::{MAX_SUBAUTHORITY_COUNT, fmt_sid};
use crate::{Sid, SidIdentifierAuthority};

/// Const-friendly fixed-size SID (`N` sub-authorities).
///
/// `ConstSid<N>` stores the SID header plus exactly `N` sub-authorities as a
/// fixed-size array, making it usable in `const` contexts and suitable for
/// static well-known SID tables. Convert with [`ConstSid::to_sid`] (or
/// `Sid::from`) when an owned [`Sid`] is needed.
///
/// # Invariants
/// - `N` must be at most 15; construction fails to compile otherwise.
///
/// # Examples
/// ```rust
/// use ds_security::{ConstSid, Sid, SidIdentifierAuthority};
///
/// const ADMIN_ALIAS: ConstSid<2> =
///     ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [32, 544]);
/// assert_eq!(ADMIN_ALIAS.to_string(), "S-1-5-32-544");
///
/// let owned: Sid = ADMIN_ALIAS.to_sid();
/// assert_eq!(owned, ADMIN_ALIAS);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstSid<const N: usize> {
    revision: u8,
    identifier_authority: SidIdentifierAuthority,
    sub_authority: [u32; N],
}

impl<const N: usize> ConstSid<N> {
    /// Creates a new `ConstSid<N>`.
    ///
    /// `N` above 15 is rejected at compile time.
    #[must_use]
    #[inline]
    pub const fn new(
        revision: u8,
        identifier_authority: SidIdentifierAuthority,
        sub_authority: [u32; N],
    ) -> Self {
        const {
            assert!(
                N <= MAX_SUBAUTHORITY_COUNT as usize,
                "a SID carries at most 15 sub-authorities"
            );
        }
        Self {
            revision,
            identifier_authority,
            sub_authority,
        }
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
    pub const fn sub_authorities(&self) -> &[u32] {
        &self.sub_authority
    }

    /// Converts to the owned, variable-length [`Sid`].
    #[must_use]
    #[inline]
    pub fn to_sid(&self) -> Sid {
        match Sid::try_new(self.identifier_authority, self.sub_authority) {
            Some(sid) => sid,
            // `new` bounds N at compile time.
            None => unreachable!(),
        }
    }
}

impl<const N: usize> From<ConstSid<N>> for Sid {
    #[inline]
    fn from(value: ConstSid<N>) -> Self {
        value.to_sid()
    }
}

impl<const N: usize> PartialEq<Sid> for ConstSid<N> {
    #[inline]
    fn eq(&self, other: &Sid) -> bool {
        self.revision == other.revision()
            && self.identifier_authority == other.identifier_authority()
            && self.sub_authority.as_slice() == other.sub_authorities()
    }
}

impl<const N: usize> PartialEq<ConstSid<N>> for Sid {
    #[inline]
    fn eq(&self, other: &ConstSid<N>) -> bool {
        other == self
    }
}

impl<const N: usize> Display for ConstSid<N> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_sid(
            self.revision,
            self.identifier_authority,
            &self.sub_authority,
            f,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
mod tests {
    use super::*;

    const ADMINS: ConstSid<2> = ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [32, 544]);

    #[test]
    fn const_and_owned_agree() {
        let owned = ADMINS.to_sid();
        assert_eq!(ADMINS, owned);
        assert_eq!(owned, ADMINS);
        assert_eq!(ADMINS.to_string(), owned.to_string());
    }

    #[test]
    fn differs_from_other_sids() {
        let users: Sid = "S-1-5-32-545".parse().unwrap();
        assert!(ADMINS != users);
    }
}
