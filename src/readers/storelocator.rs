// src/readers/storelocator.rs

//! Find the Comodo Firewall store file `cislogs.sdb`.
//!
//! The environment variable [`ENV_VAR_FWDB`] takes precedence. Otherwise the
//! conventional installation path beneath the system volume is tried.

#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::{
    FPath,
    FileOpenOptions,
    ENV_VAR_FWDB,
    ENV_VAR_SYSTEMDRIVE,
    FWDB_SUBPATH,
    SYSTEMDRIVE_DEFAULT,
};
use crate::error::{TailError, TailResult};

/// Can the file at `path` be opened for reading?
pub fn readable(path: &str) -> bool {
    FileOpenOptions::new().read(true).open(path).is_ok()
}

/// The conventional store path for the given system volume, e.g.
/// `C:\users\all users\comodo\firewall pro\cislogs.sdb`.
pub fn conventional_path(system_drive: Option<&str>) -> FPath {
    let drive: &str = match system_drive {
        Some(d) if !d.is_empty() => d,
        _ => SYSTEMDRIVE_DEFAULT,
    };
    let mut path = FPath::with_capacity(drive.len() + FWDB_SUBPATH.len());
    path.push_str(drive);
    path.push_str(FWDB_SUBPATH);

    path
}

/// Resolve the store path using `lookup_env` for environment variable
/// lookups.
///
/// An override that is set but unreadable is an error; it is never skipped
/// in favor of the conventional path.
pub fn locate_store_with<F>(lookup_env: F) -> TailResult<FPath>
where
    F: Fn(&str) -> Option<String>,
{
    defn!();
    match lookup_env(ENV_VAR_FWDB) {
        Some(value) if !value.is_empty() => {
            defo!("{}={:?}", ENV_VAR_FWDB, value);
            if readable(&value) {
                defx!("return override {:?}", value);
                return Ok(value);
            }
            defx!("override {:?} is not readable", value);
            return Err(TailError::StoreOverrideUnreadable {
                var: ENV_VAR_FWDB,
                value,
            });
        }
        _ => {}
    }

    let system_drive: Option<String> = lookup_env(ENV_VAR_SYSTEMDRIVE);
    let path: FPath = conventional_path(system_drive.as_deref());
    defo!("conventional path {:?}", path);
    if readable(&path) {
        defx!("return {:?}", path);
        return Ok(path);
    }
    defx!("not found {:?}", path);

    Err(TailError::StoreNotFound { path })
}

/// Resolve the store path from the process environment.
pub fn locate_store() -> TailResult<FPath> {
    locate_store_with(|name| std::env::var(name).ok())
}
