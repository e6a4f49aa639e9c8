//! # Directory security descriptors and access checks
//!
//! The access-control core of a directory server: the SID/ACE/ACL/security-
//! descriptor data model and the discretionary access-check engine that
//! decides what a token may do to an object, down to individual attributes
//! and extended rights. The crate provides:
//! - [`Sid`]: an owned, immutable Security Identifier with the string form,
//!   domain-containment test and RID append/split operations.
//! - [`ConstSid`]: a const-friendly, fixed-size SID (`N` sub-authorities)
//!   backing the [`well_known`] table.
//! - [`Ace`] / [`Acl`]: access-control entries and the ordered lists holding
//!   them, with the NT4/ADS revision invariant maintained on every mutation.
//! - [`SecurityDescriptor`]: the owner/group/DACL/SACL bundle, its
//!   declarative builder ([`AceSpec`]) and the full/masked comparisons the
//!   write-back paths use.
//! - [`ObjectTree`]: the per-check forest of schema GUIDs that scopes
//!   object-specific entries to attributes, classes and rights.
//! - [`access_check`] / [`check_extended_right`]: the decision algorithm.
//!
//! ## Overview
//! - **Value semantics** everywhere: descriptors own their ACLs, ACLs own
//!   their entries, entries own their trustee SIDs. `Clone` is a deep copy
//!   and the copy-before-mutate rule at the call boundary is all the
//!   concurrency control this model needs.
//! - **Explicit tokens**: every check takes its [`SecurityToken`] as an
//!   argument; there is no ambient session state.
//! - **All-or-nothing checks**: one denied bit, or one bit nothing allowed,
//!   refuses the whole request.
//!
//! Wire encodings (NDR blobs, SDDL text) are external codecs; this crate is
//! the in-memory model and the decision logic only, and it never logs:
//! every outcome is a return value for the caller to interpret.
//!
//! ## Examples
//! ### Build a descriptor and check access
//! ```rust
//! use ds_security::{
//!     AccessMask, AceFlags, AceSpec, AceType, Privileges, SdControl, SecurityDescriptor,
//!     SecurityToken, access_check, well_known,
//! };
//!
//! let sd = SecurityDescriptor::create(
//!     SdControl::empty(),
//!     Some("S-1-5-32-544"),
//!     Some("S-1-5-32-544"),
//!     &[
//!         AceSpec {
//!             trustee: "S-1-5-11", // Authenticated Users
//!             ace_type: AceType::AccessAllowed,
//!             access_mask: AccessMask::ADS_GENERIC_READ,
//!             flags: AceFlags::empty(),
//!         },
//!     ],
//! )
//! .expect("well-formed descriptor");
//!
//! let token = SecurityToken::new(
//!     "S-1-5-21-100-200-300-1104".parse().expect("valid SID"),
//!     vec![well_known::AUTHENTICATED_USERS.to_sid()],
//!     Privileges::empty(),
//! );
//!
//! let granted = access_check(&sd, &token, AccessMask::ADS_READ_PROP, None, None)
//!     .expect("readable by authenticated users");
//! assert_eq!(granted, AccessMask::ADS_READ_PROP);
//! ```
//!
//! ### Scope a check to one attribute
//! ```rust
//! use ds_security::{AccessMask, ObjectTree};
//! use uuid::uuid;
//!
//! // samAccountName's schema GUID, as resolved by the schema cache.
//! let attribute = uuid!("3e0abfd0-126a-11d0-a060-00aa006c33ed");
//! let tree = ObjectTree::with_path(&[attribute], AccessMask::ADS_WRITE_PROP);
//! assert!(tree.lookup(&attribute).is_some());
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

mod access_check;
mod access_mask;
mod ace;
mod acl;
mod const_sid;
mod descriptor;
mod error;
pub mod extended_rights;
mod object_tree;
#[cfg(feature = "serde")]
mod serde_impl;
mod sid;
mod sid_identifier_authority;
mod token;
pub mod well_known;

pub use access_check::{access_check, check_extended_right};
pub use access_mask::AccessMask;
pub use ace::{Ace, AceFlags, AceType};
pub use acl::{Acl, AclRevision};
pub use const_sid::ConstSid;
pub use descriptor::{AceSpec, SD_REVISION, SdControl, SecurityDescriptor};
pub use error::SecurityError;
pub use object_tree::{ObjectTree, ObjectTreeNode};
pub use sid::Sid;
pub use token::{Privileges, SecurityToken};

/// Identifier authority component of a SID (6-byte value).
///
/// See also: [`Sid::identifier_authority`], [`ConstSid::identifier_authority`].
pub use sid_identifier_authority::SidIdentifierAuthority;

pub use parsing::{InvalidSidFormat, MAX_SUBAUTHORITY_COUNT, MIN_SUBAUTHORITY_COUNT};

#[cfg(test)]
pub(crate) use sid::test::arb_sid;
