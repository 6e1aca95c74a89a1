//! Host-context abstraction over OS identity state.
//!
//! Everything the tool needs to know about the host is funneled through
//! the [`Host`] trait: account and group database queries, the ids of the
//! current process, and environment inspection. [`SystemHost`] is the real
//! implementation; tests substitute a stub.

use std::ffi::{CStr, CString};
use std::io;

use crate::error::{DevcaskError, DevcaskResult};

/// A user account record from the identity database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Numeric user id.
    pub uid: u32,
    /// Login name.
    pub name: String,
    /// Primary group id of the account.
    pub primary_gid: u32,
}

/// A group record from the group database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    /// Numeric group id.
    pub gid: u32,
    /// Group name.
    pub name: String,
}

/// Real and effective user/group ids of the current process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessIds {
    /// Real user id.
    pub real_uid: u32,
    /// Effective user id.
    pub effective_uid: u32,
    /// Real group id.
    pub real_gid: u32,
    /// Effective group id.
    pub effective_gid: u32,
}

/// Narrow view of host identity state.
///
/// The capability set is fixed: query by id, query by name, query the
/// current process. No mutation, no caching.
pub trait Host {
    /// Look up a user account by numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`DevcaskError::UserNotFound`] if no account has this id.
    fn user_by_id(&self, uid: u32) -> DevcaskResult<UserRecord>;

    /// Look up a user account by login name.
    ///
    /// # Errors
    ///
    /// Returns [`DevcaskError::UserNotFound`] if no account has this name.
    fn user_by_name(&self, name: &str) -> DevcaskResult<UserRecord>;

    /// Look up a group by numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`DevcaskError::GroupNotFound`] if no group has this id.
    fn group_by_id(&self, gid: u32) -> DevcaskResult<GroupRecord>;

    /// Look up a group by name.
    ///
    /// # Errors
    ///
    /// Returns [`DevcaskError::GroupNotFound`] if no group has this name.
    fn group_by_name(&self, name: &str) -> DevcaskResult<GroupRecord>;

    /// Ids of the current process.
    fn process_ids(&self) -> ProcessIds;

    /// Supplementary group ids of the current process.
    ///
    /// # Errors
    ///
    /// Returns [`DevcaskError::Io`] if the OS query fails.
    fn supplementary_groups(&self) -> DevcaskResult<Vec<u32>>;

    /// Read an environment variable, `None` if unset.
    fn env_var(&self, name: &str) -> Option<String>;
}

/// [`Host`] implementation backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl Host for SystemHost {
    fn user_by_id(&self, uid: u32) -> DevcaskResult<UserRecord> {
        lookup_passwd(&PasswdKey::Uid(uid))?.ok_or_else(|| DevcaskError::UserNotFound {
            query: uid.to_string(),
        })
    }

    fn user_by_name(&self, name: &str) -> DevcaskResult<UserRecord> {
        let Ok(cname) = CString::new(name) else {
            // Login names cannot contain NUL, so no account can match.
            return Err(DevcaskError::UserNotFound {
                query: name.to_string(),
            });
        };
        lookup_passwd(&PasswdKey::Name(&cname))?.ok_or_else(|| DevcaskError::UserNotFound {
            query: name.to_string(),
        })
    }

    fn group_by_id(&self, gid: u32) -> DevcaskResult<GroupRecord> {
        lookup_group(&GroupKey::Gid(gid))?.ok_or_else(|| DevcaskError::GroupNotFound {
            query: gid.to_string(),
        })
    }

    fn group_by_name(&self, name: &str) -> DevcaskResult<GroupRecord> {
        let Ok(cname) = CString::new(name) else {
            return Err(DevcaskError::GroupNotFound {
                query: name.to_string(),
            });
        };
        lookup_group(&GroupKey::Name(&cname))?.ok_or_else(|| DevcaskError::GroupNotFound {
            query: name.to_string(),
        })
    }

    fn process_ids(&self) -> ProcessIds {
        use rustix::process::{getegid, geteuid, getgid, getuid};

        ProcessIds {
            real_uid: getuid().as_raw(),
            effective_uid: geteuid().as_raw(),
            real_gid: getgid().as_raw(),
            effective_gid: getegid().as_raw(),
        }
    }

    fn supplementary_groups(&self) -> DevcaskResult<Vec<u32>> {
        // First call sizes the list, second fills it.
        let count = unsafe { libc::getgroups(0, std::ptr::null_mut()) };
        if count < 0 {
            return Err(io::Error::last_os_error().into());
        }
        let mut gids = vec![0 as libc::gid_t; count as usize];
        let written = unsafe { libc::getgroups(count, gids.as_mut_ptr()) };
        if written < 0 {
            return Err(io::Error::last_os_error().into());
        }
        gids.truncate(written as usize);
        Ok(gids)
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

enum PasswdKey<'a> {
    Uid(u32),
    Name(&'a CStr),
}

enum GroupKey<'a> {
    Gid(u32),
    Name(&'a CStr),
}

/// Query the account database via the reentrant getpw* family.
///
/// `Ok(None)` means the query completed but matched no record.
fn lookup_passwd(key: &PasswdKey<'_>) -> io::Result<Option<UserRecord>> {
    let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::passwd = std::ptr::null_mut();
    let mut buf = vec![0 as libc::c_char; 1024];

    loop {
        let rc = match key {
            PasswdKey::Uid(uid) => unsafe {
                libc::getpwuid_r(*uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result)
            },
            PasswdKey::Name(name) => unsafe {
                libc::getpwnam_r(name.as_ptr(), &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result)
            },
        };

        if rc == 0 {
            break;
        }
        if rc == libc::ERANGE {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        return Err(io::Error::from_raw_os_error(rc));
    }

    if result.is_null() {
        return Ok(None);
    }

    let name = unsafe { CStr::from_ptr(pwd.pw_name) }
        .to_string_lossy()
        .into_owned();
    Ok(Some(UserRecord {
        uid: pwd.pw_uid,
        name,
        primary_gid: pwd.pw_gid,
    }))
}

/// Query the group database via the reentrant getgr* family.
fn lookup_group(key: &GroupKey<'_>) -> io::Result<Option<GroupRecord>> {
    let mut grp: libc::group = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::group = std::ptr::null_mut();
    let mut buf = vec![0 as libc::c_char; 1024];

    loop {
        let rc = match key {
            GroupKey::Gid(gid) => unsafe {
                libc::getgrgid_r(*gid, &mut grp, buf.as_mut_ptr(), buf.len(), &mut result)
            },
            GroupKey::Name(name) => unsafe {
                libc::getgrnam_r(name.as_ptr(), &mut grp, buf.as_mut_ptr(), buf.len(), &mut result)
            },
        };

        if rc == 0 {
            break;
        }
        if rc == libc::ERANGE {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        return Err(io::Error::from_raw_os_error(rc));
    }

    if result.is_null() {
        return Ok(None);
    }

    let name = unsafe { CStr::from_ptr(grp.gr_name) }
        .to_string_lossy()
        .into_owned();
    Ok(Some(GroupRecord {
        gid: grp.gr_gid,
        name,
    }))
}
