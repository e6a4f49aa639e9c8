//! Access Control Lists.
//!
//! An ACL is an ordered run of ACEs plus a revision tag. The revision is not
//! an independent fact: it is `Ads` exactly when the list holds at least one
//! object-scoped entry, and it is re-derived on every mutation.

use crate::{Ace, SecurityError, Sid};

/// ACL revision levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AclRevision {
    /// Legacy revision: no object-scoped entries present.
    Nt4 = 2,
    /// Extended revision, required once any entry is object-scoped.
    Ads = 4,
}

/// An ordered Access Control List.
///
/// Order is load-bearing: evaluation walks entries first to last and a deny
/// shadows any later allow, so two ACLs holding the same entries in
/// different order are **not** equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acl {
    revision: AclRevision,
    aces: Vec<Ace>,
}

impl Acl {
    /// An empty ACL at the legacy revision.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            revision: AclRevision::Nt4,
            aces: Vec::new(),
        }
    }

    /// The current revision, derived from the entries.
    #[must_use]
    #[inline]
    pub const fn revision(&self) -> AclRevision {
        self.revision
    }

    /// The entries, in evaluation order.
    #[must_use]
    #[inline]
    pub fn aces(&self) -> &[Ace] {
        &self.aces
    }

    /// Number of entries.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.aces.len()
    }

    /// Whether the list holds no entries. An empty ACL grants nothing,
    /// which is very different from an absent one.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.aces.is_empty()
    }

    /// Appends `ace` and re-derives the revision.
    #[inline]
    pub fn add(&mut self, ace: Ace) {
        self.aces.push(ace);
        self.refresh_revision();
    }

    /// Removes **every** entry whose trustee equals `trustee`; a list may
    /// legally carry several entries per trustee. Relative order of the
    /// survivors is preserved and the revision re-derived.
    ///
    /// # Errors
    /// [`SecurityError::NotFound`] if no entry named the trustee.
    #[inline]
    pub fn delete_by_trustee(&mut self, trustee: &Sid) -> Result<(), SecurityError> {
        let before = self.aces.len();
        self.aces.retain(|ace| ace.trustee != *trustee);
        if self.aces.len() == before {
            return Err(SecurityError::NotFound);
        }
        self.refresh_revision();
        Ok(())
    }

    /// Revision invariant: `Ads` iff any entry is object-scoped.
    fn refresh_revision(&mut self) {
        self.revision = if self.aces.iter().any(|ace| ace.ace_type.is_object()) {
            AclRevision::Ads
        } else {
            AclRevision::Nt4
        };
    }
}

impl Default for Acl {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
