//! Security descriptors.
//!
//! The owner/group/DACL/SACL bundle attached to every securable directory
//! entry, together with the declarative construction and comparison helpers
//! the entry-creation and write-back paths use.

use bitflags::bitflags;

use crate::{AccessMask, Ace, AceFlags, AceType, Acl, SecurityError, Sid};

/// Security descriptor revision.
pub const SD_REVISION: u8 = 1;

bitflags! {
    /// Security descriptor control word.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct SdControl: u16 {
        /// The owner was supplied by a defaulting mechanism.
        const OWNER_DEFAULTED = 0x0001;
        /// The group was supplied by a defaulting mechanism.
        const GROUP_DEFAULTED = 0x0002;
        /// A DACL is present (possibly empty).
        const DACL_PRESENT = 0x0004;
        /// The DACL was supplied by a defaulting mechanism.
        const DACL_DEFAULTED = 0x0008;
        /// A SACL is present (possibly empty).
        const SACL_PRESENT = 0x0010;
        /// The SACL was supplied by a defaulting mechanism.
        const SACL_DEFAULTED = 0x0020;
        /// The DACL is trusted as supplied.
        const DACL_TRUSTED = 0x0040;
        /// Server-side descriptor.
        const SERVER_SECURITY = 0x0080;
        /// Request automatic DACL inheritance.
        const DACL_AUTO_INHERIT_REQ = 0x0100;
        /// Request automatic SACL inheritance.
        const SACL_AUTO_INHERIT_REQ = 0x0200;
        /// The DACL carries inherited entries.
        const DACL_AUTO_INHERITED = 0x0400;
        /// The SACL carries inherited entries.
        const SACL_AUTO_INHERITED = 0x0800;
        /// The DACL is protected from inheritance.
        const DACL_PROTECTED = 0x1000;
        /// The SACL is protected from inheritance.
        const SACL_PROTECTED = 0x2000;
        /// The resource-manager control byte is valid.
        const RM_CONTROL_VALID = 0x4000;
        /// Self-relative (flat) form marker.
        const SELF_RELATIVE = 0x8000;
    }
}

/// A security descriptor.
///
/// Absence of a DACL or SACL is distinct from a present-but-empty one and is
/// preserved through copies and comparisons; an absent DACL refuses nothing
/// while an empty one refuses everything. Deep copies are `Clone`: the
/// descriptor owns its SIDs and ACLs outright, so a clone shares nothing
/// with its source.
///
/// # Examples
/// ```rust
/// use ds_security::{AccessMask, AceFlags, AceSpec, AceType, SdControl, SecurityDescriptor};
///
/// let sd = SecurityDescriptor::create(
///     SdControl::empty(),
///     Some("S-1-5-32-544"),
///     Some("S-1-5-32-544"),
///     &[AceSpec {
///         trustee: "S-1-5-11",
///         ace_type: AceType::AccessAllowed,
///         access_mask: AccessMask::ADS_GENERIC_READ,
///         flags: AceFlags::empty(),
///     }],
/// )
/// .unwrap();
/// assert!(sd.control().contains(SdControl::DACL_PRESENT));
/// assert_eq!(sd.dacl().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityDescriptor {
    revision: u8,
    control: SdControl,
    owner: Option<Sid>,
    group: Option<Sid>,
    dacl: Option<Acl>,
    sacl: Option<Acl>,
}

/// One DACL entry for [`SecurityDescriptor::create`] /
/// [`SecurityDescriptor::append`]: the trustee in string form plus the
/// entry's type, mask and flags. Entries are applied in slice order, and
/// order matters to evaluation.
#[derive(Debug, Clone, Copy)]
pub struct AceSpec<'a> {
    /// Trustee SID in `S-1-…` form.
    pub trustee: &'a str,
    /// Grant/deny/audit discriminant.
    pub ace_type: AceType,
    /// The rights the entry carries.
    pub access_mask: AccessMask,
    /// Inheritance and audit flags.
    pub flags: AceFlags,
}

impl SecurityDescriptor {
    /// A blank descriptor: no owner, group, DACL or SACL.
    ///
    /// The control word is marked self-relative even though the in-memory
    /// form is an owned graph rather than a flat buffer; every descriptor
    /// this server stores or emits is self-relative, and keeping the bit set
    /// here lets the one external serializer treat all of them uniformly.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            revision: SD_REVISION,
            control: SdControl::SELF_RELATIVE,
            owner: None,
            group: None,
            dacl: None,
            sacl: None,
        }
    }

    /// The descriptor revision.
    #[must_use]
    #[inline]
    pub const fn revision(&self) -> u8 {
        self.revision
    }

    /// The control word.
    #[must_use]
    #[inline]
    pub const fn control(&self) -> SdControl {
        self.control
    }

    /// The owner SID, if set.
    #[must_use]
    #[inline]
    pub const fn owner(&self) -> Option<&Sid> {
        self.owner.as_ref()
    }

    /// The primary group SID, if set.
    #[must_use]
    #[inline]
    pub const fn group(&self) -> Option<&Sid> {
        self.group.as_ref()
    }

    /// The discretionary ACL, if present.
    #[must_use]
    #[inline]
    pub const fn dacl(&self) -> Option<&Acl> {
        self.dacl.as_ref()
    }

    /// The system (audit) ACL, if present.
    #[must_use]
    #[inline]
    pub const fn sacl(&self) -> Option<&Acl> {
        self.sacl.as_ref()
    }

    /// Sets or clears the owner SID.
    #[inline]
    pub fn set_owner(&mut self, owner: Option<Sid>) {
        self.owner = owner;
    }

    /// Sets or clears the primary group SID.
    #[inline]
    pub fn set_group(&mut self, group: Option<Sid>) {
        self.group = group;
    }

    /// Installs or removes the SACL, keeping `SACL_PRESENT` in sync.
    #[inline]
    pub fn set_sacl(&mut self, sacl: Option<Acl>) {
        self.control.set(SdControl::SACL_PRESENT, sacl.is_some());
        self.sacl = sacl;
    }

    /// Appends `ace` to the DACL, creating an empty legacy-revision DACL
    /// first if the descriptor has none, and sets `DACL_PRESENT`.
    #[inline]
    pub fn dacl_add(&mut self, ace: Ace) {
        let dacl = self.dacl.get_or_insert_with(Acl::new);
        dacl.add(ace);
        self.control.insert(SdControl::DACL_PRESENT);
    }

    /// Removes every DACL entry naming `trustee`.
    ///
    /// # Errors
    /// [`SecurityError::NotFound`] when the descriptor has no DACL or no
    /// entry names the trustee.
    #[inline]
    pub fn dacl_delete(&mut self, trustee: &Sid) -> Result<(), SecurityError> {
        match self.dacl.as_mut() {
            None => Err(SecurityError::NotFound),
            Some(dacl) => dacl.delete_by_trustee(trustee),
        }
    }

    /// Compares two descriptors, but lets `mask` exclude the DACL and/or
    /// SACL from the comparison; owner and group always participate. Used
    /// by write-back paths that only care whether the part of the
    /// descriptor they manage actually changed.
    ///
    /// Pass [`SdControl::DACL_PRESENT`] / [`SdControl::SACL_PRESENT`] in
    /// `mask` to include the respective list.
    #[must_use]
    #[inline]
    pub fn masked_eq(&self, other: &Self, mask: SdControl) -> bool {
        if self.revision != other.revision {
            return false;
        }
        if self.control & mask != other.control & mask {
            return false;
        }
        if self.owner != other.owner || self.group != other.group {
            return false;
        }
        if mask.contains(SdControl::DACL_PRESENT) && self.dacl != other.dacl {
            return false;
        }
        if mask.contains(SdControl::SACL_PRESENT) && self.sacl != other.sacl {
            return false;
        }
        true
    }

    /// Builds a descriptor from string SIDs and a declarative DACL.
    ///
    /// `control` is OR-ed onto the blank descriptor's control word, the
    /// owner and group are parsed if given, then every [`AceSpec`] is
    /// applied in order via [`SecurityDescriptor::dacl_add`].
    ///
    /// Construction is atomic: the first SID that fails to parse discards
    /// the partially-built descriptor and propagates the failure.
    ///
    /// # Errors
    /// [`SecurityError::InvalidSidFormat`] if any SID string is malformed.
    #[inline]
    pub fn create(
        control: SdControl,
        owner: Option<&str>,
        group: Option<&str>,
        aces: &[AceSpec<'_>],
    ) -> Result<Self, SecurityError> {
        let mut sd = Self::new();
        sd.control.insert(control);

        if let Some(owner) = owner {
            sd.owner = Some(owner.parse()?);
        }
        if let Some(group) = group {
            sd.group = Some(group.parse()?);
        }

        sd.append(aces)?;
        Ok(sd)
    }

    /// Applies more [`AceSpec`] entries to the DACL, in order.
    ///
    /// # Errors
    /// [`SecurityError::InvalidSidFormat`] on the first malformed trustee.
    /// Entries before the failing one have already been applied, so a caller
    /// that needs atomicity discards the descriptor on error, which is what
    /// [`SecurityDescriptor::create`] does.
    #[inline]
    pub fn append(&mut self, aces: &[AceSpec<'_>]) -> Result<(), SecurityError> {
        for spec in aces {
            let trustee: Sid = spec.trustee.parse()?;
            self.dacl_add(Ace::new(spec.ace_type, spec.flags, spec.access_mask, trustee));
        }
        Ok(())
    }
}

impl Default for SecurityDescriptor {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
mod tests {
    use super::*;
    use crate::well_known;

    fn read_spec(trustee: &'static str) -> AceSpec<'static> {
        AceSpec {
            trustee,
            ace_type: AceType::AccessAllowed,
            access_mask: AccessMask::ADS_READ_PROP,
            flags: AceFlags::empty(),
        }
    }

    #[test]
    fn blank_descriptor_is_self_relative_and_empty() {
        let sd = SecurityDescriptor::new();
        assert_eq!(sd.revision(), SD_REVISION);
        assert_eq!(sd.control(), SdControl::SELF_RELATIVE);
        assert!(sd.owner().is_none());
        assert!(sd.group().is_none());
        assert!(sd.dacl().is_none());
        assert!(sd.sacl().is_none());
    }

    #[test]
    fn dacl_add_creates_the_list_lazily() {
        let mut sd = SecurityDescriptor::new();
        assert!(!sd.control().contains(SdControl::DACL_PRESENT));

        sd.dacl_add(Ace::new(
            AceType::AccessAllowed,
            AceFlags::empty(),
            AccessMask::ADS_LIST,
            well_known::WORLD.to_sid(),
        ));
        assert!(sd.control().contains(SdControl::DACL_PRESENT));
        assert_eq!(sd.dacl().unwrap().len(), 1);
    }

    #[test]
    fn dacl_delete_without_a_dacl_fails() {
        let mut sd = SecurityDescriptor::new();
        assert_eq!(
            sd.dacl_delete(&well_known::WORLD.to_sid()),
            Err(SecurityError::NotFound)
        );
    }

    #[test]
    fn deep_copy_shares_nothing() {
        let original = SecurityDescriptor::create(
            SdControl::empty(),
            Some("S-1-5-32-544"),
            None,
            &[read_spec("S-1-1-0")],
        )
        .unwrap();

        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.dacl_delete(&well_known::WORLD.to_sid()).unwrap();
        assert_ne!(copy, original);
        assert_eq!(original.dacl().unwrap().len(), 1, "copy mutated the original");
    }

    #[test]
    fn empty_dacl_differs_from_absent_dacl() {
        let absent = SecurityDescriptor::new();

        let mut empty = SecurityDescriptor::new();
        empty.dacl_add(Ace::new(
            AceType::AccessAllowed,
            AceFlags::empty(),
            AccessMask::ADS_LIST,
            well_known::WORLD.to_sid(),
        ));
        empty.dacl_delete(&well_known::WORLD.to_sid()).unwrap();
        assert!(empty.dacl().is_some_and(Acl::is_empty));

        assert_ne!(absent, empty);
        // Two present-but-empty DACLs compare equal.
        assert_eq!(empty, empty.clone());
    }

    #[test]
    fn masked_eq_can_ignore_the_dacl() {
        let a = SecurityDescriptor::create(
            SdControl::empty(),
            Some("S-1-5-32-544"),
            Some("S-1-5-32-545"),
            &[read_spec("S-1-1-0")],
        )
        .unwrap();
        let b = SecurityDescriptor::create(
            SdControl::empty(),
            Some("S-1-5-32-544"),
            Some("S-1-5-32-545"),
            &[read_spec("S-1-5-11")],
        )
        .unwrap();

        assert_ne!(a, b);
        assert!(a.masked_eq(&b, SdControl::SACL_PRESENT));
        assert!(!a.masked_eq(&b, SdControl::DACL_PRESENT));
    }

    #[test]
    fn masked_eq_always_compares_owner_and_group() {
        let a = SecurityDescriptor::create(SdControl::empty(), Some("S-1-5-32-544"), None, &[])
            .unwrap();
        let b = SecurityDescriptor::create(SdControl::empty(), Some("S-1-5-32-545"), None, &[])
            .unwrap();
        assert!(!a.masked_eq(&b, SdControl::empty()));
    }

    #[test]
    fn create_is_atomic_on_bad_trustees() {
        let result = SecurityDescriptor::create(
            SdControl::empty(),
            Some("S-1-5-32-544"),
            None,
            &[read_spec("S-1-1-0"), read_spec("not-a-sid")],
        );
        assert!(matches!(result, Err(SecurityError::InvalidSidFormat(_))));
    }

    #[test]
    fn create_rejects_a_bad_owner() {
        let result = SecurityDescriptor::create(SdControl::empty(), Some("bogus"), None, &[]);
        assert!(matches!(result, Err(SecurityError::InvalidSidFormat(_))));
    }

    proptest::proptest! {
        #[test]
        fn a_copy_always_equals_its_source(owner in crate::arb_sid(), trustee in crate::arb_sid()) {
            let mut sd = SecurityDescriptor::new();
            sd.set_owner(Some(owner));
            sd.dacl_add(Ace::new(
                AceType::AccessAllowed,
                AceFlags::empty(),
                AccessMask::ADS_READ_PROP,
                trustee,
            ));
            proptest::prop_assert_eq!(&sd.clone(), &sd);
        }
    }

    #[test]
    fn set_sacl_tracks_presence() {
        let mut sd = SecurityDescriptor::new();
        sd.set_sacl(Some(Acl::new()));
        assert!(sd.control().contains(SdControl::SACL_PRESENT));
        sd.set_sacl(None);
        assert!(!sd.control().contains(SdControl::SACL_PRESENT));
    }
}
