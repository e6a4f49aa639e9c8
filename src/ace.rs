//! Access Control Entries.

use bitflags::bitflags;
use uuid::Uuid;

use crate::{AccessMask, Sid};

/// ACE type discriminants.
///
/// The object-scoped variants additionally carry the GUID of the attribute,
/// property set, class or extended right they apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AceType {
    /// Grants the masked rights to the trustee.
    AccessAllowed = 0,
    /// Denies the masked rights to the trustee.
    AccessDenied = 1,
    /// Audits use of the masked rights (SACL only).
    SystemAudit = 2,
    /// Raises an alarm on use of the masked rights (SACL only).
    SystemAlarm = 3,
    /// Grant scoped to an object-type GUID.
    AccessAllowedObject = 5,
    /// Deny scoped to an object-type GUID.
    AccessDeniedObject = 6,
    /// Audit scoped to an object-type GUID.
    SystemAuditObject = 7,
    /// Alarm scoped to an object-type GUID.
    SystemAlarmObject = 8,
}

impl AceType {
    /// Whether this type may carry object-type GUIDs.
    #[must_use]
    #[inline]
    pub const fn is_object(self) -> bool {
        matches!(
            self,
            Self::AccessAllowedObject
                | Self::AccessDeniedObject
                | Self::SystemAuditObject
                | Self::SystemAlarmObject
        )
    }

    /// Whether this type grants access.
    #[must_use]
    #[inline]
    pub const fn allows(self) -> bool {
        matches!(self, Self::AccessAllowed | Self::AccessAllowedObject)
    }

    /// Whether this type denies access.
    #[must_use]
    #[inline]
    pub const fn denies(self) -> bool {
        matches!(self, Self::AccessDenied | Self::AccessDeniedObject)
    }
}

bitflags! {
    /// ACE inheritance and audit flags.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct AceFlags: u8 {
        /// Inherit onto non-container children.
        const OBJECT_INHERIT = 0x01;
        /// Inherit onto container children.
        const CONTAINER_INHERIT = 0x02;
        /// Children do not propagate the entry further.
        const NO_PROPAGATE_INHERIT = 0x04;
        /// The entry applies only to children, not this object.
        const INHERIT_ONLY = 0x08;
        /// The entry was inherited, not set explicitly. Canonical DACL order
        /// places inherited entries after explicit ones; this crate trusts
        /// the caller to maintain that and never re-sorts.
        const INHERITED_ACE = 0x10;
        /// Audit successful access (audit types only).
        const SUCCESSFUL_ACCESS = 0x40;
        /// Audit failed access (audit types only).
        const FAILED_ACCESS = 0x80;
    }
}

/// A single Access Control Entry.
///
/// # Equality
/// `PartialEq` compares type, flags, access mask and trustee only. The
/// object-type GUIDs deliberately do **not** participate: an object-scoped
/// entry compares equal to its plain counterpart when the core fields match.
/// Callers depend on the loose form for deduplication, so it is kept even
/// though it conflates entries that differ only in scope; compare
/// [`Ace::object_type`] directly where that distinction matters.
#[derive(Debug, Clone)]
pub struct Ace {
    /// Grant/deny/audit discriminant.
    pub ace_type: AceType,
    /// Inheritance and audit flags.
    pub flags: AceFlags,
    /// The rights this entry grants, denies or audits.
    pub access_mask: AccessMask,
    /// The principal or group the entry names.
    pub trustee: Sid,
    object_type: Option<Uuid>,
    inherited_object_type: Option<Uuid>,
}

impl Ace {
    /// Creates a plain (non-object) entry.
    #[must_use]
    #[inline]
    pub fn new(ace_type: AceType, flags: AceFlags, access_mask: AccessMask, trustee: Sid) -> Self {
        Self {
            ace_type,
            flags,
            access_mask,
            trustee,
            object_type: None,
            inherited_object_type: None,
        }
    }

    /// Creates an object-scoped entry.
    ///
    /// Returns `None` unless `ace_type` is one of the object variants; only
    /// those may carry object-type GUIDs.
    #[must_use]
    #[inline]
    pub fn object(
        ace_type: AceType,
        flags: AceFlags,
        access_mask: AccessMask,
        trustee: Sid,
        object_type: Option<Uuid>,
        inherited_object_type: Option<Uuid>,
    ) -> Option<Self> {
        ace_type.is_object().then(|| Self {
            ace_type,
            flags,
            access_mask,
            trustee,
            object_type,
            inherited_object_type,
        })
    }

    /// GUID of the attribute, property set, class or extended right this
    /// entry is scoped to. Always `None` on plain entry types.
    #[must_use]
    #[inline]
    pub const fn object_type(&self) -> Option<&Uuid> {
        self.object_type.as_ref()
    }

    /// GUID of the class this entry is inherited onto. Always `None` on
    /// plain entry types.
    #[must_use]
    #[inline]
    pub const fn inherited_object_type(&self) -> Option<&Uuid> {
        self.inherited_object_type.as_ref()
    }
}

impl PartialEq for Ace {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ace_type == other.ace_type
            && self.flags == other.flags
            && self.access_mask == other.access_mask
            && self.trustee == other.trustee
    }
}

impl Eq for Ace {}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
mod tests {
    use super::*;
    use uuid::uuid;

    fn world() -> Sid {
        crate::well_known::WORLD.to_sid()
    }

    #[test]
    fn plain_entries_never_carry_guids() {
        let ace = Ace::new(
            AceType::AccessAllowed,
            AceFlags::empty(),
            AccessMask::ADS_READ_PROP,
            world(),
        );
        assert_eq!(ace.object_type(), None);
        assert_eq!(ace.inherited_object_type(), None);
    }

    #[test]
    fn object_constructor_rejects_plain_types() {
        let guid = uuid!("bf9679c0-0de6-11d0-a285-00aa003049e2");
        assert!(
            Ace::object(
                AceType::AccessAllowed,
                AceFlags::empty(),
                AccessMask::ADS_WRITE_PROP,
                world(),
                Some(guid),
                None,
            )
            .is_none()
        );
        assert!(
            Ace::object(
                AceType::AccessAllowedObject,
                AceFlags::empty(),
                AccessMask::ADS_WRITE_PROP,
                world(),
                Some(guid),
                None,
            )
            .is_some()
        );
    }

    #[test]
    fn equality_ignores_object_guids() {
        let guid = uuid!("00299570-246d-11d0-a768-00aa006e0529");
        let scoped = Ace::object(
            AceType::AccessAllowedObject,
            AceFlags::empty(),
            AccessMask::ADS_CONTROL_ACCESS,
            world(),
            Some(guid),
            None,
        )
        .unwrap();
        let unscoped = Ace::object(
            AceType::AccessAllowedObject,
            AceFlags::empty(),
            AccessMask::ADS_CONTROL_ACCESS,
            world(),
            None,
            None,
        )
        .unwrap();
        // The documented looseness: scope does not participate.
        assert_eq!(scoped, unscoped);
    }

    #[test]
    fn equality_sees_every_core_field() {
        let base = Ace::new(
            AceType::AccessAllowed,
            AceFlags::empty(),
            AccessMask::ADS_READ_PROP,
            world(),
        );
        let mut other = base.clone();
        other.ace_type = AceType::AccessDenied;
        assert_ne!(base, other);

        let mut other = base.clone();
        other.flags = AceFlags::INHERITED_ACE;
        assert_ne!(base, other);

        let mut other = base.clone();
        other.access_mask = AccessMask::ADS_WRITE_PROP;
        assert_ne!(base, other);

        let mut other = base.clone();
        other.trustee = crate::well_known::ANONYMOUS.to_sid();
        assert_ne!(base, other);
    }
}
