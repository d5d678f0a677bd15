//! The invoking operator's OS identity.

use crate::error::Result;

/// Login name and group memberships of the user running the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalActor {
    /// Login name.
    pub name: String,
    /// Names of every group the user belongs to, primary group included.
    pub groups: Vec<String>,
}

impl LocalActor {
    /// Create an actor from known values.
    pub fn new(name: impl Into<String>, groups: Vec<String>) -> Self {
        Self {
            name: name.into(),
            groups,
        }
    }

    /// Read the identity of the current process's real user.
    pub fn current() -> Result<Self> {
        #[cfg(unix)]
        {
            unix::current()
        }
        #[cfg(not(unix))]
        {
            let name = std::env::var("USER")
                .or_else(|_| std::env::var("USERNAME"))
                .map_err(|_| anyhow::anyhow!("Unable to determine the current user"))?;
            Ok(Self::new(name, Vec::new()))
        }
    }
}

#[cfg(unix)]
mod unix {
    use std::ffi::CStr;
    use std::ptr;

    use super::LocalActor;
    use crate::error::Result;

    const BUF_SIZE: usize = 16 * 1024;

    pub(super) fn current() -> Result<LocalActor> {
        // SAFETY: getuid() is a simple syscall that cannot fail
        let uid = unsafe { libc::getuid() };

        // SAFETY: passwd is plain data; getpwuid_r fills it and points its
        // string fields into `buf`, which outlives every read below
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut buf = vec![0 as libc::c_char; BUF_SIZE];
        let mut found: *mut libc::passwd = ptr::null_mut();
        let rc = unsafe { libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut found) };
        if rc != 0 || found.is_null() {
            return Err(anyhow::anyhow!("No passwd entry for uid {}", uid).into());
        }
        // SAFETY: pw_name is a NUL-terminated string inside `buf`
        let name = unsafe { CStr::from_ptr(pwd.pw_name) }
            .to_string_lossy()
            .into_owned();

        let mut gids = supplementary_groups()?;
        if !gids.contains(&pwd.pw_gid) {
            gids.push(pwd.pw_gid);
        }

        let groups = gids.into_iter().filter_map(group_name).collect();
        Ok(LocalActor::new(name, groups))
    }

    fn supplementary_groups() -> Result<Vec<libc::gid_t>> {
        // SAFETY: a zero-sized call only returns the group count
        let count = unsafe { libc::getgroups(0, ptr::null_mut()) };
        if count < 0 {
            return Err(std::io::Error::last_os_error().into());
        }

        let mut gids = vec![0 as libc::gid_t; count as usize];
        // SAFETY: gids has room for exactly `count` entries
        let written = unsafe { libc::getgroups(count, gids.as_mut_ptr()) };
        if written < 0 {
            return Err(std::io::Error::last_os_error().into());
        }
        gids.truncate(written as usize);
        Ok(gids)
    }

    fn group_name(gid: libc::gid_t) -> Option<String> {
        // SAFETY: same contract as getpwuid_r above
        let mut grp: libc::group = unsafe { std::mem::zeroed() };
        let mut buf = vec![0 as libc::c_char; BUF_SIZE];
        let mut found: *mut libc::group = ptr::null_mut();
        let rc = unsafe { libc::getgrgid_r(gid, &mut grp, buf.as_mut_ptr(), buf.len(), &mut found) };
        if rc != 0 || found.is_null() {
            tracing::trace!("No group entry for gid {}", gid);
            return None;
        }
        // SAFETY: gr_name is a NUL-terminated string inside `buf`
        Some(
            unsafe { CStr::from_ptr(grp.gr_name) }
                .to_string_lossy()
                .into_owned(),
        )
    }
}
