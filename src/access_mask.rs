//! Access mask bits.
//!
//! The 32-bit capability word carried by ACEs and access-check requests:
//! low 16 bits are object-specific (here: directory) rights, then the
//! standard rights, the request-time flags, and the four generic bits that
//! get folded into concrete rights before evaluation.

use bitflags::bitflags;

bitflags! {
    /// A 32-bit access mask.
    ///
    /// Unknown bits are preserved rather than dropped so masks coming from
    /// foreign descriptors survive a round trip through this crate.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct AccessMask: u32 {
        // Directory-specific rights.
        /// Create child objects under this object.
        const ADS_CREATE_CHILD = 0x0000_0001;
        /// Delete child objects.
        const ADS_DELETE_CHILD = 0x0000_0002;
        /// Enumerate the children of this object.
        const ADS_LIST = 0x0000_0004;
        /// Validated writes against the object itself.
        const ADS_SELF_WRITE = 0x0000_0008;
        /// Read properties (attributes).
        const ADS_READ_PROP = 0x0000_0010;
        /// Write properties (attributes).
        const ADS_WRITE_PROP = 0x0000_0020;
        /// Delete the whole subtree.
        const ADS_DELETE_TREE = 0x0000_0040;
        /// See the object in lists even without ADS_LIST on the parent.
        const ADS_LIST_OBJECT = 0x0000_0080;
        /// Exercise a control-access (extended) right.
        const ADS_CONTROL_ACCESS = 0x0000_0100;
        /// Every directory-specific right.
        const ADS_ALL_ACCESS = 0x0000_01FF;

        // Standard rights.
        /// Delete the object.
        const STD_DELETE = 0x0001_0000;
        /// Read the security descriptor (sans SACL).
        const STD_READ_CONTROL = 0x0002_0000;
        /// Modify the DACL.
        const STD_WRITE_DAC = 0x0004_0000;
        /// Take ownership.
        const STD_WRITE_OWNER = 0x0008_0000;
        /// Wait on the object handle.
        const STD_SYNCHRONIZE = 0x0010_0000;
        /// The four standard rights every object type supports.
        const STD_RIGHTS_REQUIRED = 0x000F_0000;

        // Request-time flags, never stored in an ACE.
        /// Access to the SACL; gated on the security privilege.
        const SYSTEM_SECURITY = 0x0100_0000;
        /// Ask for whatever the DACL would grant.
        const MAXIMUM_ALLOWED = 0x0200_0000;

        // Generic rights, mapped to concrete rights before evaluation.
        /// Everything.
        const GENERIC_ALL = 0x1000_0000;
        /// Execute/traverse.
        const GENERIC_EXECUTE = 0x2000_0000;
        /// Generic write.
        const GENERIC_WRITE = 0x4000_0000;
        /// Generic read.
        const GENERIC_READ = 0x8000_0000;

        // What the generic bits mean for directory objects.
        /// `GENERIC_READ` on a directory object.
        const ADS_GENERIC_READ = Self::STD_READ_CONTROL.bits()
            | Self::ADS_LIST.bits()
            | Self::ADS_READ_PROP.bits()
            | Self::ADS_LIST_OBJECT.bits();
        /// `GENERIC_WRITE` on a directory object.
        const ADS_GENERIC_WRITE = Self::STD_READ_CONTROL.bits()
            | Self::ADS_SELF_WRITE.bits()
            | Self::ADS_WRITE_PROP.bits();
        /// `GENERIC_EXECUTE` on a directory object.
        const ADS_GENERIC_EXECUTE = Self::STD_READ_CONTROL.bits() | Self::ADS_LIST.bits();
        /// `GENERIC_ALL` on a directory object.
        const ADS_GENERIC_ALL = Self::STD_RIGHTS_REQUIRED.bits() | Self::ADS_ALL_ACCESS.bits();

        const _ = !0;
    }
}

impl AccessMask {
    /// Folds the generic bits into the concrete directory rights they stand
    /// for. Callers map a request before handing it to the access check;
    /// stored ACEs are expected to carry concrete rights already.
    ///
    /// # Examples
    /// ```rust
    /// use ds_security::AccessMask;
    ///
    /// let mapped = (AccessMask::GENERIC_READ | AccessMask::STD_DELETE).map_generic();
    /// assert!(mapped.contains(AccessMask::ADS_LIST | AccessMask::STD_DELETE));
    /// assert!(!mapped.intersects(AccessMask::GENERIC_READ));
    /// ```
    #[must_use]
    #[inline]
    pub fn map_generic(self) -> Self {
        let mut mask = self;
        if mask.contains(Self::GENERIC_READ) {
            mask.remove(Self::GENERIC_READ);
            mask.insert(Self::ADS_GENERIC_READ);
        }
        if mask.contains(Self::GENERIC_WRITE) {
            mask.remove(Self::GENERIC_WRITE);
            mask.insert(Self::ADS_GENERIC_WRITE);
        }
        if mask.contains(Self::GENERIC_EXECUTE) {
            mask.remove(Self::GENERIC_EXECUTE);
            mask.insert(Self::ADS_GENERIC_EXECUTE);
        }
        if mask.contains(Self::GENERIC_ALL) {
            mask.remove(Self::GENERIC_ALL);
            mask.insert(Self::ADS_GENERIC_ALL);
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_mapping_clears_every_generic_bit() {
        let mapped = (AccessMask::GENERIC_ALL
            | AccessMask::GENERIC_READ
            | AccessMask::GENERIC_WRITE
            | AccessMask::GENERIC_EXECUTE)
            .map_generic();
        assert!(!mapped.intersects(
            AccessMask::GENERIC_ALL
                | AccessMask::GENERIC_READ
                | AccessMask::GENERIC_WRITE
                | AccessMask::GENERIC_EXECUTE
        ));
        assert!(mapped.contains(AccessMask::ADS_GENERIC_ALL));
    }

    #[test]
    fn mapping_leaves_concrete_rights_alone() {
        let mask = AccessMask::ADS_WRITE_PROP | AccessMask::STD_WRITE_DAC;
        assert_eq!(mask.map_generic(), mask);
    }

    #[test]
    fn unknown_bits_survive() {
        let foreign = AccessMask::from_bits_retain(0x0000_0200);
        assert_eq!(foreign.bits(), 0x0000_0200);
    }
}
