//! Identity resolution for the inner developer account.
//!
//! The caller may give any subset of user id, login name, group id and
//! group name. Whatever is missing is reconciled against the host's
//! account database so the resolved tuple is always fully populated.

use devcask_common::{DevcaskError, DevcaskResult, Host};

/// Partially-specified identity from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentitySpec {
    /// Numeric user id, if given.
    pub user_id: Option<u32>,
    /// Login name, if given.
    pub user_name: Option<String>,
    /// Numeric group id, if given.
    pub group_id: Option<u32>,
    /// Group name, if given.
    pub group_name: Option<String>,
}

/// Fully determined identity for the inner account.
///
/// `user_id`/`user_name` refer to the same account record and
/// `group_id`/`group_name` to the same group record, except when the
/// caller supplied both halves of a pair, which are passed through
/// unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// Numeric user id.
    pub user_id: u32,
    /// Login name.
    pub user_name: String,
    /// Numeric group id.
    pub group_id: u32,
    /// Group name.
    pub group_name: String,
}

/// Resolve a partial identity specification against the host.
///
/// User resolution: neither field given adopts the current process's real
/// uid; a single field is completed by database lookup; both fields are
/// trusted as-is with no consistency check. Group resolution works the
/// same way, except the neither-given default depends on context: with
/// effective gid 0 it is the resolved user's primary group, otherwise the
/// process's own real gid.
///
/// # Errors
///
/// [`DevcaskError::Config`] when running with effective uid 0 and neither
/// user id nor login name was given (root must not silently become the
/// inner user). [`DevcaskError::UserNotFound`] or
/// [`DevcaskError::GroupNotFound`] when a lookup matches no record.
pub fn resolve(spec: &IdentitySpec, host: &dyn Host) -> DevcaskResult<ResolvedIdentity> {
    let ids = host.process_ids();

    if ids.effective_uid == 0 && spec.user_id.is_none() && spec.user_name.is_none() {
        return Err(DevcaskError::Config {
            message: "running as root: the user id and/or login name must be specified"
                .to_string(),
        });
    }

    let (user_id, user_name) = match (spec.user_id, spec.user_name.as_deref()) {
        (None, None) => {
            let uid = ids.real_uid;
            (uid, host.user_by_id(uid)?.name)
        }
        (None, Some(name)) => (host.user_by_name(name)?.uid, name.to_string()),
        (Some(uid), None) => (uid, host.user_by_id(uid)?.name),
        (Some(uid), Some(name)) => (uid, name.to_string()),
    };

    let (group_id, group_name) = match (spec.group_id, spec.group_name.as_deref()) {
        (None, None) => {
            // Under a privileged effective gid the caller's own group is
            // meaningless for the inner account; fall back to the resolved
            // user's primary group instead.
            let gid = if ids.effective_gid == 0 {
                host.user_by_id(user_id)?.primary_gid
            } else {
                ids.real_gid
            };
            (gid, host.group_by_id(gid)?.name)
        }
        (None, Some(name)) => (host.group_by_name(name)?.gid, name.to_string()),
        (Some(gid), None) => (gid, host.group_by_id(gid)?.name),
        (Some(gid), Some(name)) => (gid, name.to_string()),
    };

    Ok(ResolvedIdentity {
        user_id,
        user_name,
        group_id,
        group_name,
    })
}
