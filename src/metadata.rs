//! Per-entry metadata used by the long format
//!
//! Ownership, link counts and block counts are platform specific. They are
//! reached through [`FileMetadataProvider`] so the renderer can fall back to
//! placeholder values on hosts without POSIX ownership.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

/// Capability for the metadata the long format needs beyond size and mtime.
///
/// `None` means the host cannot supply the value; callers render a placeholder.
pub trait FileMetadataProvider {
    fn owner_name(&self, meta: &Metadata) -> Option<String>;
    fn group_name(&self, meta: &Metadata) -> Option<String>;
    fn link_count(&self, meta: &Metadata) -> Option<u64>;
    /// Allocated 512-byte blocks
    fn block_count(&self, meta: &Metadata) -> Option<u64>;

    /// Target of the symlink at `path`, or `None` when it cannot be read.
    fn symlink_target(&self, path: &Path) -> Option<PathBuf> {
        fs::read_link(path).ok()
    }
}

/// Provider for hosts without POSIX ownership data.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderMetadataProvider;

impl FileMetadataProvider for PlaceholderMetadataProvider {
    fn owner_name(&self, _meta: &Metadata) -> Option<String> {
        None
    }

    fn group_name(&self, _meta: &Metadata) -> Option<String> {
        None
    }

    fn link_count(&self, _meta: &Metadata) -> Option<u64> {
        None
    }

    fn block_count(&self, _meta: &Metadata) -> Option<u64> {
        None
    }
}

#[cfg(unix)]
pub use unix::UnixMetadataProvider;

/// The best provider available on this host.
pub fn default_provider() -> Box<dyn FileMetadataProvider> {
    #[cfg(unix)]
    {
        Box::new(UnixMetadataProvider::new())
    }
    #[cfg(not(unix))]
    {
        Box::new(PlaceholderMetadataProvider)
    }
}

#[cfg(unix)]
mod unix {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::ffi::CStr;
    use std::fs::Metadata;
    use std::os::unix::fs::MetadataExt;

    use tracing::trace;

    use super::FileMetadataProvider;

    /// Name used when an id has no passwd/group entry.
    const UNKNOWN_NAME: &str = "unknown";

    const INITIAL_BUF_LEN: usize = 1024;
    const MAX_BUF_LEN: usize = 1 << 20;

    /// Provider backed by `stat` fields and the passwd/group databases.
    ///
    /// Name lookups are cached per id for the lifetime of the provider.
    #[derive(Debug, Default)]
    pub struct UnixMetadataProvider {
        users: RefCell<HashMap<u32, String>>,
        groups: RefCell<HashMap<u32, String>>,
    }

    impl UnixMetadataProvider {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl FileMetadataProvider for UnixMetadataProvider {
        fn owner_name(&self, meta: &Metadata) -> Option<String> {
            let uid = meta.uid();
            let name = self
                .users
                .borrow_mut()
                .entry(uid)
                .or_insert_with(|| lookup_user(uid).unwrap_or_else(|| UNKNOWN_NAME.to_string()))
                .clone();
            Some(name)
        }

        fn group_name(&self, meta: &Metadata) -> Option<String> {
            let gid = meta.gid();
            let name = self
                .groups
                .borrow_mut()
                .entry(gid)
                .or_insert_with(|| lookup_group(gid).unwrap_or_else(|| UNKNOWN_NAME.to_string()))
                .clone();
            Some(name)
        }

        fn link_count(&self, meta: &Metadata) -> Option<u64> {
            Some(meta.nlink())
        }

        fn block_count(&self, meta: &Metadata) -> Option<u64> {
            Some(meta.blocks())
        }
    }

    fn lookup_user(uid: u32) -> Option<String> {
        let mut buf: Vec<libc::c_char> = vec![0; INITIAL_BUF_LEN];
        loop {
            // SAFETY: zeroed passwd is a valid out-parameter; getpwuid_r only writes
            // into `pwd` and `buf`, and `result` is checked before `pwd` is read.
            let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
            let mut result: *mut libc::passwd = std::ptr::null_mut();
            let rc = unsafe {
                libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut result)
            };
            if rc == libc::ERANGE && buf.len() < MAX_BUF_LEN {
                buf.resize(buf.len() * 2, 0);
                continue;
            }
            if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
                trace!(uid, rc, "no passwd entry");
                return None;
            }
            // SAFETY: pw_name points into `buf`, which outlives this borrow.
            let name = unsafe { CStr::from_ptr(pwd.pw_name) };
            return Some(name.to_string_lossy().into_owned());
        }
    }

    fn lookup_group(gid: u32) -> Option<String> {
        let mut buf: Vec<libc::c_char> = vec![0; INITIAL_BUF_LEN];
        loop {
            // SAFETY: as in lookup_user, for the group database.
            let mut grp: libc::group = unsafe { std::mem::zeroed() };
            let mut result: *mut libc::group = std::ptr::null_mut();
            let rc = unsafe {
                libc::getgrgid_r(gid, &mut grp, buf.as_mut_ptr(), buf.len(), &mut result)
            };
            if rc == libc::ERANGE && buf.len() < MAX_BUF_LEN {
                buf.resize(buf.len() * 2, 0);
                continue;
            }
            if rc != 0 || result.is_null() || grp.gr_name.is_null() {
                trace!(gid, rc, "no group entry");
                return None;
            }
            // SAFETY: gr_name points into `buf`, which outlives this borrow.
            let name = unsafe { CStr::from_ptr(grp.gr_name) };
            return Some(name.to_string_lossy().into_owned());
        }
    }
}

/// Render the type and permission bits as a 10-character string like `drwxr-xr-x`.
#[cfg(unix)]
pub fn permission_string(meta: &Metadata) -> String {
    use std::os::unix::fs::{FileTypeExt, PermissionsExt};

    let file_type = meta.file_type();
    let type_char = if file_type.is_dir() {
        'd'
    } else if file_type.is_symlink() {
        'l'
    } else if file_type.is_fifo() {
        'p'
    } else if file_type.is_socket() {
        's'
    } else if file_type.is_char_device() {
        'c'
    } else if file_type.is_block_device() {
        'b'
    } else {
        '-'
    };

    let mode = meta.permissions().mode();
    let mut out = String::with_capacity(10);
    out.push(type_char);
    out.push_str(&triplet(mode >> 6, mode & 0o4000 != 0, 's'));
    out.push_str(&triplet(mode >> 3, mode & 0o2000 != 0, 's'));
    out.push_str(&triplet(mode, mode & 0o1000 != 0, 't'));
    out
}

#[cfg(not(unix))]
pub fn permission_string(meta: &Metadata) -> String {
    let type_char = if meta.is_dir() { 'd' } else { '-' };
    let bits = if meta.permissions().readonly() {
        "r--r--r--"
    } else {
        "rw-rw-rw-"
    };
    format!("{}{}", type_char, bits)
}

/// One `rwx` group. `special` replaces the execute slot (`s`/`t`, upper case when not executable).
#[cfg(unix)]
fn triplet(bits: u32, special: bool, special_char: char) -> String {
    let r = if bits & 0o4 != 0 { 'r' } else { '-' };
    let w = if bits & 0o2 != 0 { 'w' } else { '-' };
    let executable = bits & 0o1 != 0;
    let x = match (special, executable) {
        (true, true) => special_char,
        (true, false) => special_char.to_ascii_uppercase(),
        (false, true) => 'x',
        (false, false) => '-',
    };
    [r, w, x].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDir;

    #[test]
    fn test_placeholder_provider_has_no_data() {
        let dir = TestDir::new();
        let file = dir.add_file("a.txt", "x");
        let meta = fs::metadata(&file).unwrap();

        let provider = PlaceholderMetadataProvider;
        assert!(provider.owner_name(&meta).is_none());
        assert!(provider.group_name(&meta).is_none());
        assert!(provider.link_count(&meta).is_none());
        assert!(provider.block_count(&meta).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_string_modes() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TestDir::new();
        let file = dir.add_file("a.txt", "x");
        fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();
        let meta = fs::metadata(&file).unwrap();
        assert_eq!(permission_string(&meta), "-rw-r--r--");

        let sub = dir.add_dir("sub");
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o755)).unwrap();
        let meta = fs::metadata(&sub).unwrap();
        assert_eq!(permission_string(&meta), "drwxr-xr-x");

        fs::set_permissions(&sub, fs::Permissions::from_mode(0o1777)).unwrap();
        let meta = fs::metadata(&sub).unwrap();
        assert_eq!(permission_string(&meta), "drwxrwxrwt");
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_string_symlink() {
        let dir = TestDir::new();
        dir.add_file("target.txt", "x");
        let link = dir.add_symlink("target.txt", "link");
        let meta = fs::symlink_metadata(&link).unwrap();
        assert!(permission_string(&meta).starts_with('l'));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_provider_reports_ownership() {
        let dir = TestDir::new();
        let file = dir.add_file("a.txt", "x");
        let meta = fs::metadata(&file).unwrap();

        let provider = UnixMetadataProvider::new();
        let owner = provider.owner_name(&meta).unwrap();
        assert!(!owner.is_empty());
        // Second call is served from the cache and must agree.
        assert_eq!(provider.owner_name(&meta).unwrap(), owner);
        assert!(provider.group_name(&meta).is_some());
        assert_eq!(provider.link_count(&meta), Some(1));
        assert!(provider.block_count(&meta).is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_target_read() {
        let dir = TestDir::new();
        let link = dir.add_symlink("nowhere", "dangling");
        let provider = PlaceholderMetadataProvider;
        assert_eq!(provider.symlink_target(&link), Some(PathBuf::from("nowhere")));

        let plain = dir.add_file("plain", "x");
        assert!(provider.symlink_target(&plain).is_none());
    }
}
