// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling, command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::fs::File;
pub use std::path::Path;

// TODO: use `std::path::PathBuf` for `FPath`
/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FileOpenOptions = std::fs::OpenOptions;

/// General purpose counting type, e.g. rows printed, polls made.
pub type Count = u64;

/// Value of column `fwevents.id`, the primary ordering key of a firewall
/// event.
pub type RowId = i64;
/// A count of rows as passed by the user, e.g. `-25`.
pub type RowCount = u32;

/// Environment variable that overrides the location of the store file.
pub const ENV_VAR_FWDB: &str = "TAIL_COMODO_FWDB";

/// Environment variable holding the system volume, e.g. `C:`.
pub const ENV_VAR_SYSTEMDRIVE: &str = "SystemDrive";

/// Used when [`ENV_VAR_SYSTEMDRIVE`] is not set.
pub const SYSTEMDRIVE_DEFAULT: &str = "C:";

/// Conventional location of the Comodo Firewall store file, relative to the
/// system volume.
pub const FWDB_SUBPATH: &str = "\\users\\all users\\comodo\\firewall pro\\cislogs.sdb";

/// Default number of rows shown by `ShowLastN` and the first `Follow` poll.
pub const WINDOW_DEFAULT: RowCount = 10;

/// Default seconds slept between `Follow` polls.
pub const INTERVAL_SECS_DEFAULT: u64 = 1;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// run-time behavior
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// How the firewall log is to be tailed. Chosen once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunMode {
    /// print the last N events then exit
    ShowLastN,
    /// print every event then exit
    ShowAll,
    /// print the last N events then poll for new events until interrupted
    Follow,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::ShowLastN => write!(f, "ShowLastN"),
            RunMode::ShowAll => write!(f, "ShowAll"),
            RunMode::Follow => write!(f, "Follow"),
        }
    }
}
