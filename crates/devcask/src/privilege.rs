//! Elevation policy for the docker invocation.
//!
//! Decides whether `docker build` must be run under `sudo`. This is about
//! reaching the docker daemon socket on the host; it is independent of the
//! identity resolved for the inside of the image.

use devcask_common::{DevcaskError, DevcaskResult, Host};

/// Environment variable designating a remote or alternate docker daemon.
pub const DOCKER_HOST_ENV: &str = "DOCKER_HOST";

/// Group whose members may talk to the local docker socket.
pub const DOCKER_GROUP: &str = "docker";

/// Snapshot of the host state that drives the elevation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivilegeContext {
    /// Effective user id of the current process.
    pub effective_uid: u32,
    /// `DOCKER_HOST` points at a remote/alternate daemon endpoint.
    pub remote_daemon: bool,
    /// The caller belongs to the docker group.
    pub docker_group_member: bool,
}

impl PrivilegeContext {
    /// Capture the elevation-relevant state of the current host.
    ///
    /// # Errors
    ///
    /// Propagates OS errors from the supplementary-group query. A missing
    /// docker group is not an error; it simply means no socket access via
    /// group membership.
    pub fn from_host(host: &dyn Host) -> DevcaskResult<Self> {
        Ok(Self {
            effective_uid: host.process_ids().effective_uid,
            remote_daemon: host.env_var(DOCKER_HOST_ENV).is_some(),
            docker_group_member: in_docker_group(host)?,
        })
    }

    /// Whether the docker invocation must be prefixed with `sudo`.
    ///
    /// First match wins: already root, remote daemon, or docker group
    /// membership each make elevation unnecessary.
    #[must_use]
    pub const fn elevation_required(&self) -> bool {
        self.effective_uid != 0 && !self.remote_daemon && !self.docker_group_member
    }
}

/// Whether any of the caller's groups is the docker group.
fn in_docker_group(host: &dyn Host) -> DevcaskResult<bool> {
    match host.group_by_name(DOCKER_GROUP) {
        Ok(group) => {
            let ids = host.process_ids();
            if ids.effective_gid == group.gid {
                return Ok(true);
            }
            Ok(host.supplementary_groups()?.contains(&group.gid))
        }
        // No docker group on this host means membership is impossible,
        // not that the decision failed.
        Err(DevcaskError::GroupNotFound { .. }) => {
            tracing::debug!("no '{DOCKER_GROUP}' group in the group database");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}
