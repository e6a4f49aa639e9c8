//! Well-known control-access and validated-write rights.
//!
//! Extended rights are named permissions identified by GUID rather than by
//! an access-mask bit; they are checked through
//! [`crate::check_extended_right`]. The handful the server grants in its
//! default descriptors live here so callers and tests do not re-type raw
//! GUID strings.

use uuid::{Uuid, uuid};

/// Change own password (with knowledge of the old one).
pub const USER_CHANGE_PASSWORD: Uuid = uuid!("ab721a53-1e2f-11d0-9819-00aa0040529b");

/// Reset another principal's password without the old one.
pub const USER_FORCE_CHANGE_PASSWORD: Uuid = uuid!("00299570-246d-11d0-a768-00aa006e0529");

/// Validated write to the member attribute: add or remove oneself.
pub const SELF_MEMBERSHIP: Uuid = uuid!("bf9679c0-0de6-11d0-a285-00aa003049e2");

/// Validated write to dNSHostName.
pub const VALIDATED_DNS_HOST_NAME: Uuid = uuid!("72e39547-7b18-11d1-adef-00c04fd8d5cd");

/// Validated write to servicePrincipalName.
pub const VALIDATED_SPN: Uuid = uuid!("f3a64788-5306-11d1-a9c5-0000f80367c1");
