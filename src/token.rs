//! Security tokens.
//!
//! The resolved identity an access check runs against. Tokens are built by
//! the authentication layer (which flattens nested group memberships and
//! adds the well-known groups) and handed to this crate read-only. There is
//! no ambient "current session" anywhere in the engine; every check names
//! its token explicitly.

use bitflags::bitflags;

use crate::Sid;

bitflags! {
    /// Privileges a token may hold.
    ///
    /// Only the ones this engine consults plus the pair the surrounding
    /// server assigns for backup tooling.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Privileges: u64 {
        /// Short-circuits every access check. Held only by the builtin
        /// system session the server itself runs under.
        const BYPASS_ACCESS_CHECK = 1 << 0;
        /// Grants `SYSTEM_SECURITY` (SACL) access when requested.
        const SECURITY = 1 << 1;
        /// Grants `STD_WRITE_OWNER` without a matching ACE.
        const TAKE_OWNERSHIP = 1 << 2;
        /// Read for backup regardless of the DACL.
        const BACKUP = 1 << 3;
        /// Write for restore regardless of the DACL.
        const RESTORE = 1 << 4;
    }
}

/// The resolved identity of a requesting principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityToken {
    user_sid: Sid,
    group_sids: Vec<Sid>,
    privileges: Privileges,
}

impl SecurityToken {
    /// Builds a token from its resolved parts. `group_sids` is the already
    /// flattened membership set including the well-known groups.
    #[must_use]
    #[inline]
    pub const fn new(user_sid: Sid, group_sids: Vec<Sid>, privileges: Privileges) -> Self {
        Self {
            user_sid,
            group_sids,
            privileges,
        }
    }

    /// The primary SID of the principal.
    #[must_use]
    #[inline]
    pub const fn user_sid(&self) -> &Sid {
        &self.user_sid
    }

    /// Every group and alias SID the principal resolves to.
    #[must_use]
    #[inline]
    pub fn group_sids(&self) -> &[Sid] {
        &self.group_sids
    }

    /// The privilege set.
    #[must_use]
    #[inline]
    pub const fn privileges(&self) -> Privileges {
        self.privileges
    }

    /// Whether the token is, or is a member of, `sid`. This is the trustee
    /// match the DACL walk performs per entry.
    #[must_use]
    #[inline]
    pub fn has_sid(&self, sid: &Sid) -> bool {
        self.user_sid == *sid || self.group_sids.contains(sid)
    }

    /// Whether every privilege in `privileges` is held.
    #[must_use]
    #[inline]
    pub const fn has_privilege(&self, privileges: Privileges) -> bool {
        self.privileges.contains(privileges)
    }
}
