//! Discretionary access evaluation.
//!
//! The decision algorithm the rest of the server defers to: given a
//! descriptor, a token, a requested mask and (for attribute- and
//! right-scoped requests) an object tree, either every requested bit is
//! granted or the whole request is refused. There is no partial success: a
//! single denied bit, or a single bit nothing allowed, fails the request.
//!
//! Entries are evaluated exactly in stored order. Callers keep DACLs in
//! canonical order (explicit denies first, then explicit allows, then
//! inherited entries) when they need the classic semantics; the engine never
//! re-sorts and never second-guesses the stored order.

use uuid::Uuid;

use crate::{
    AccessMask, Ace, AceType, ObjectTree, Privileges, SdControl, SecurityDescriptor,
    SecurityError, SecurityToken, Sid,
};

/// Evaluates `access_desired` for `token` against `sd`.
///
/// `tree` scopes the request to specific attributes, classes or rights:
/// object-scoped entries apply only when their object-type GUID occurs in
/// the tree. Without a tree, object-scoped entries are evaluated against the
/// whole request. `resource_sid` is the SID of the object being accessed;
/// when it is the requester itself, validated self-writes are pre-granted.
///
/// Generic bits are not mapped here; callers fold them with
/// [`AccessMask::map_generic`] before the check, as stored ACEs are expected
/// to carry concrete rights.
///
/// Returns the granted mask, which covers the full request (with
/// `MAXIMUM_ALLOWED` resolved to whatever the DACL yields).
///
/// # Errors
/// - [`SecurityError::AccessDenied`]: some requested bit was denied or
///   never allowed. The normal negative outcome, not a fault.
/// - [`SecurityError::PrivilegeNotHeld`]: `SYSTEM_SECURITY` was requested
///   without [`Privileges::SECURITY`].
///
/// # Examples
/// ```rust
/// use ds_security::{
///     AccessMask, AceFlags, AceSpec, AceType, Privileges, SdControl, SecurityDescriptor,
///     SecurityError, SecurityToken, access_check,
/// };
///
/// let sd = SecurityDescriptor::create(
///     SdControl::empty(),
///     Some("S-1-5-32-544"),
///     None,
///     &[AceSpec {
///         trustee: "S-1-5-21-1-2-3-1104",
///         ace_type: AceType::AccessAllowed,
///         access_mask: AccessMask::ADS_READ_PROP,
///         flags: AceFlags::empty(),
///     }],
/// )
/// .unwrap();
///
/// let token = SecurityToken::new(
///     "S-1-5-21-1-2-3-1104".parse().unwrap(),
///     Vec::new(),
///     Privileges::empty(),
/// );
///
/// let granted = access_check(&sd, &token, AccessMask::ADS_READ_PROP, None, None).unwrap();
/// assert_eq!(granted, AccessMask::ADS_READ_PROP);
///
/// let refused = access_check(&sd, &token, AccessMask::ADS_WRITE_PROP, None, None);
/// assert_eq!(refused, Err(SecurityError::AccessDenied));
/// ```
#[inline]
pub fn access_check(
    sd: &SecurityDescriptor,
    token: &SecurityToken,
    access_desired: AccessMask,
    tree: Option<&ObjectTree>,
    resource_sid: Option<&Sid>,
) -> Result<AccessMask, SecurityError> {
    if token.has_privilege(Privileges::BYPASS_ACCESS_CHECK) {
        return Ok(access_desired);
    }

    let mut desired = access_desired;
    if desired.contains(AccessMask::MAXIMUM_ALLOWED) {
        desired.remove(AccessMask::MAXIMUM_ALLOWED);
        desired |= max_allowed(sd, token, tree);
    }

    let mut remaining = desired;
    let mut granted = AccessMask::empty();

    // A principal may always perform validated writes against its own entry.
    if resource_sid.is_some_and(|resource| resource == token.user_sid()) {
        let self_bits = remaining & AccessMask::ADS_SELF_WRITE;
        granted |= self_bits;
        remaining -= self_bits;
    }

    if remaining.contains(AccessMask::SYSTEM_SECURITY) {
        if !token.has_privilege(Privileges::SECURITY) {
            return Err(SecurityError::PrivilegeNotHeld);
        }
        granted |= AccessMask::SYSTEM_SECURITY;
        remaining -= AccessMask::SYSTEM_SECURITY;
    }

    // The owner reads and rewrites its own DACL without needing an entry.
    if sd.owner().is_some_and(|owner| token.has_sid(owner)) {
        let owner_bits = remaining & (AccessMask::STD_READ_CONTROL | AccessMask::STD_WRITE_DAC);
        granted |= owner_bits;
        remaining -= owner_bits;
    }
    if remaining.contains(AccessMask::STD_WRITE_OWNER)
        && token.has_privilege(Privileges::TAKE_OWNERSHIP)
    {
        granted |= AccessMask::STD_WRITE_OWNER;
        remaining -= AccessMask::STD_WRITE_OWNER;
    }

    // No DACL at all withholds nothing. An empty one is walked below and
    // grants nothing.
    let dacl = if sd.control().contains(SdControl::DACL_PRESENT) {
        sd.dacl()
    } else {
        None
    };
    let Some(dacl) = dacl else {
        return Ok(desired);
    };

    let mut denied = AccessMask::empty();
    for ace in dacl.aces() {
        if remaining.is_empty() {
            break;
        }
        if !ace_applies(ace, token, tree) {
            continue;
        }
        let relevant = ace.access_mask & remaining;
        if relevant.is_empty() {
            continue;
        }
        if ace.ace_type.denies() {
            // Denied bits can never be granted by a later allow.
            denied |= relevant;
            remaining -= relevant;
        } else if ace.ace_type.allows() {
            granted |= relevant;
            remaining -= relevant;
        }
        // Audit and alarm entries never affect the decision.
    }

    // Denied bits always lie inside the request; one of them fails the
    // whole request.
    if !denied.is_empty() {
        return Err(SecurityError::AccessDenied);
    }
    // Bits nothing allowed stay refused.
    if !remaining.is_empty() {
        return Err(SecurityError::AccessDenied);
    }
    Ok(granted)
}

/// Evaluates a control-access (extended) right named by its GUID string.
///
/// The same algorithm as [`access_check`], specialized to a single-GUID
/// object tree carrying [`AccessMask::ADS_CONTROL_ACCESS`]; this is how
/// rights such as "reset password" are granted, since they correspond to a
/// GUID rather than a mask bit.
///
/// # Errors
/// - [`SecurityError::InvalidGuidFormat`]: `right` is not a GUID.
/// - The [`access_check`] failures otherwise.
#[inline]
pub fn check_extended_right(
    sd: &SecurityDescriptor,
    token: &SecurityToken,
    right: &str,
    resource_sid: Option<&Sid>,
) -> Result<AccessMask, SecurityError> {
    let guid = Uuid::parse_str(right).map_err(|_| SecurityError::InvalidGuidFormat)?;
    let tree = ObjectTree::with_path(&[guid], AccessMask::ADS_CONTROL_ACCESS);
    access_check(
        sd,
        token,
        AccessMask::ADS_CONTROL_ACCESS,
        Some(&tree),
        resource_sid,
    )
}

/// Whether an entry participates in the walk for this token and scope.
fn ace_applies(ace: &Ace, token: &SecurityToken, tree: Option<&ObjectTree>) -> bool {
    if !token.has_sid(&ace.trustee) {
        return false;
    }
    if !ace.ace_type.is_object() {
        return true;
    }
    match (tree, ace.object_type()) {
        // No tree: object entries are evaluated against the whole request.
        (None, _) => true,
        // An object entry without an object type applies to the object
        // itself, like a plain entry.
        (Some(_), None) => true,
        (Some(tree), Some(guid)) => tree.lookup(guid).is_some(),
    }
}

/// What `MAXIMUM_ALLOWED` resolves to: everything the DACL allows the token
/// that no earlier entry denied, plus the owner's implicit rights. An absent
/// DACL resolves to full control.
fn max_allowed(
    sd: &SecurityDescriptor,
    token: &SecurityToken,
    tree: Option<&ObjectTree>,
) -> AccessMask {
    let mut granted = AccessMask::empty();
    let mut denied = AccessMask::empty();

    if sd.owner().is_some_and(|owner| token.has_sid(owner)) {
        granted |= AccessMask::STD_READ_CONTROL | AccessMask::STD_WRITE_DAC;
    }

    let dacl = if sd.control().contains(SdControl::DACL_PRESENT) {
        sd.dacl()
    } else {
        None
    };
    let Some(dacl) = dacl else {
        return granted | AccessMask::ADS_GENERIC_ALL;
    };

    for ace in dacl.aces() {
        if !ace_applies(ace, token, tree) {
            continue;
        }
        match ace.ace_type {
            AceType::AccessAllowed | AceType::AccessAllowedObject => {
                granted |= ace.access_mask;
                granted -= denied;
            }
            AceType::AccessDenied | AceType::AccessDeniedObject => {
                denied |= ace.access_mask - granted;
            }
            _ => {}
        }
    }

    granted - denied
}
