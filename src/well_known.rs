//! Well-known SIDs.
//!
//! The constants a directory server actually hands out in default security
//! descriptors and resolved tokens. Each is a [`ConstSid`] so it can live in
//! static tables; convert with `to_sid` where an owned [`crate::Sid`] is
//! needed.

use crate::{ConstSid, SidIdentifierAuthority};

// ---- Basic Authorities ----

/// Null SID (S-1-0-0)
pub const NULL: ConstSid<1> = ConstSid::new(1, SidIdentifierAuthority::NULL_AUTHORITY, [0]);

/// World SID (S-1-1-0)
pub const WORLD: ConstSid<1> =
    ConstSid::new(1, SidIdentifierAuthority::SECURITY_WORLD_AUTHORITY, [0]);

/// Creator Owner SID (S-1-3-0)
pub const CREATOR_OWNER: ConstSid<1> =
    ConstSid::new(1, SidIdentifierAuthority::SECURITY_CREATOR_AUTHORITY, [0]);

/// Creator Group SID (S-1-3-1)
pub const CREATOR_GROUP: ConstSid<1> =
    ConstSid::new(1, SidIdentifierAuthority::SECURITY_CREATOR_AUTHORITY, [1]);

// ---- NT Authority (S-1-5) ----

/// Anonymous Logon (S-1-5-7)
pub const ANONYMOUS: ConstSid<1> = ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [7]);

/// Enterprise Domain Controllers (S-1-5-9)
pub const ENTERPRISE_DOMAIN_CONTROLLERS: ConstSid<1> =
    ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [9]);

/// Principal Self (S-1-5-10), the placeholder trustee replaced by the SID of
/// the object an ACL is attached to.
pub const PRINCIPAL_SELF: ConstSid<1> =
    ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [10]);

/// Authenticated Users (S-1-5-11)
pub const AUTHENTICATED_USERS: ConstSid<1> =
    ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [11]);

/// Local System (S-1-5-18)
pub const LOCAL_SYSTEM: ConstSid<1> = ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [18]);

/// Local Service (S-1-5-19)
pub const LOCAL_SERVICE: ConstSid<1> = ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [19]);

/// Network Service (S-1-5-20)
pub const NETWORK_SERVICE: ConstSid<1> =
    ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [20]);

// ---- BUILTIN Domain (S-1-5-32) ----

/// BUILTIN\Administrators (S-1-5-32-544)
pub const BUILTIN_ADMINISTRATORS: ConstSid<2> =
    ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [32, 544]);

/// BUILTIN\Users (S-1-5-32-545)
pub const BUILTIN_USERS: ConstSid<2> =
    ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [32, 545]);

/// BUILTIN\Guests (S-1-5-32-546)
pub const BUILTIN_GUESTS: ConstSid<2> =
    ConstSid::new(1, SidIdentifierAuthority::NT_AUTHORITY, [32, 546]);
