// src/data/fwevent.rs

//! Implement [`FwEvent`], one decoded row of the Comodo Firewall table
//! `fwevents`, and the decoding of the raw stored fields.
//!
//! Integer codes are mapped to [`Protocol`], [`Direction`], and [`Action`].
//! Addresses are stored as 8-byte blobs, see [`decode_address`].

use std::fmt;
use std::net::Ipv4Addr;

#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::RowId;

/// Size of a stored address blob.
pub const ADDR_BLOB_SZ: usize = 8;

/// Offset of the meaningful IPv4 octets within an address blob.
///
/// The first four bytes are a second 32-bit value of unknown meaning
/// (possibly part of an IPv6 address). They are discarded.
pub const ADDR_BLOB_IPV4_OFFSET: usize = 4;

/// Displayed in place of any unrecognized code or unreadable address.
pub const UNKNOWN_STR: &str = "?";

/// Optional decoded address; `None` when the stored blob is NULL or too short.
pub type AddrOpt = Option<Ipv4Addr>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// decoded field enums
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Network protocol of an event, column `fwevents.protocol`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Protocol {
    Igmp,
    Tcp,
    Udp,
    Unknown,
}

impl Protocol {
    pub const fn from_code(code: i64) -> Protocol {
        match code {
            2 => Protocol::Igmp,
            6 => Protocol::Tcp,
            17 => Protocol::Udp,
            _ => Protocol::Unknown,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Protocol::Igmp => "IGMP",
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Unknown => UNKNOWN_STR,
        }
    }
}

/// Direction of an event, column `fwevents.direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    /// Only `1` is outbound. Every other value, including `0`, is inbound.
    pub const fn from_code(code: i64) -> Direction {
        match code {
            1 => Direction::Outbound,
            _ => Direction::Inbound,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Inbound => "IN",
            Direction::Outbound => "OUT",
        }
    }
}

/// What the firewall did, column `fwevents.action`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Blocked,
    Asked,
    Unknown,
}

impl Action {
    pub const fn from_code(code: i64) -> Action {
        match code {
            2 => Action::Blocked,
            8 => Action::Asked,
            _ => Action::Unknown,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Blocked => "Blocked",
            Action::Asked => "Asked",
            Action::Unknown => UNKNOWN_STR,
        }
    }
}

macro_rules! impl_display_as_str {
    ($($t:ty),*) => {
        $(
            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    // `pad` so callers may pass width and alignment
                    f.pad(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(Protocol, Direction, Action);

/// Decode an address blob into an IPv4 address.
///
/// Only bytes `4..8` are used, e.g. blob `[0,0,0,0, 192,168,1,10]` is
/// `192.168.1.10`. Returns `None` if the blob has fewer than
/// [`ADDR_BLOB_SZ`] bytes.
pub fn decode_address(blob: &[u8]) -> AddrOpt {
    if blob.len() < ADDR_BLOB_SZ {
        defñ!("blob len {} < {}; return None", blob.len(), ADDR_BLOB_SZ);
        return None;
    }
    let o = &blob[ADDR_BLOB_IPV4_OFFSET..ADDR_BLOB_SZ];

    Some(Ipv4Addr::new(o[0], o[1], o[2], o[3]))
}

/// Display helper for an [`AddrOpt`].
pub fn addr_to_string(addr: &AddrOpt) -> String {
    match addr {
        Some(ip) => ip.to_string(),
        None => String::from(UNKNOWN_STR),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RawFwEvent, FwEvent
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One `fwevents` row as read from the store, before decoding.
///
/// Columns are coerced the way SQLite coerces them, so NULL integer columns
/// are `0` and NULL text columns are empty. NULL blobs are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawFwEvent {
    pub id: RowId,
    pub logdate: String,
    pub path: String,
    pub pid: i64,
    pub protocol: i64,
    pub direction: i64,
    pub srcport: i64,
    pub dstport: i64,
    pub action: i64,
    pub srcaddr: Option<Vec<u8>>,
    pub dstaddr: Option<Vec<u8>>,
}

/// A decoded, display-ready firewall event.
///
/// Each `FwEvent` owns its data; nothing is shared across rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FwEvent {
    pub id: RowId,
    /// `datetime(logdate)` as returned by SQLite, `YYYY-MM-DD HH:MM:SS`
    pub logdate: String,
    /// path of the process that caused the event
    pub path: String,
    pub pid: i64,
    pub protocol: Protocol,
    pub direction: Direction,
    pub srcaddr: AddrOpt,
    pub srcport: i64,
    pub dstaddr: AddrOpt,
    pub dstport: i64,
    pub action: Action,
}

impl FwEvent {
    /// Decode a [`RawFwEvent`]. Pure; no I/O.
    pub fn decode(raw: RawFwEvent) -> FwEvent {
        defñ!("id {}", raw.id);
        let srcaddr = raw.srcaddr.as_deref().and_then(decode_address);
        let dstaddr = raw.dstaddr.as_deref().and_then(decode_address);

        FwEvent {
            id: raw.id,
            logdate: raw.logdate,
            path: raw.path,
            pid: raw.pid,
            protocol: Protocol::from_code(raw.protocol),
            direction: Direction::from_code(raw.direction),
            srcaddr,
            srcport: raw.srcport,
            dstaddr,
            dstport: raw.dstport,
            action: Action::from_code(raw.action),
        }
    }

    pub fn srcaddr_string(&self) -> String {
        addr_to_string(&self.srcaddr)
    }

    pub fn dstaddr_string(&self) -> String {
        addr_to_string(&self.dstaddr)
    }
}

impl From<RawFwEvent> for FwEvent {
    fn from(raw: RawFwEvent) -> Self {
        FwEvent::decode(raw)
    }
}
