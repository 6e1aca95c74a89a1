//! # devcask
//!
//! Wrapper around `docker build` that bakes the invoking host user's
//! identity into a developer image, so files created inside the container
//! on bind-mounted volumes keep host ownership.
//!
//! The pipeline is strictly linear: resolve the inner user/group identity
//! against the host account database, decide whether the `docker`
//! invocation itself needs `sudo`, assemble the exact `docker build`
//! command line, and replace the current process with it.

#![warn(missing_docs)]

pub mod cli;
pub mod command;
pub mod exec;
pub mod identity;
pub mod privilege;

#[cfg(test)]
pub(crate) mod testhost;

pub use command::{BuildCommand, BuildConfig};
pub use identity::{IdentitySpec, ResolvedIdentity};
pub use privilege::PrivilegeContext;
