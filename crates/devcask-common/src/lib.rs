//! # devcask-common
//!
//! Shared building blocks for the devcask developer-image tool:
//! - Common error types
//! - Host-context abstraction over the OS identity database and
//!   process identity

#![warn(missing_docs)]

pub mod error;
pub mod host;

pub use error::{DevcaskError, DevcaskResult};
pub use host::{GroupRecord, Host, ProcessIds, SystemHost, UserRecord};
