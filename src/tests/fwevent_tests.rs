// src/tests/fwevent_tests.rs

//! tests for `fwevent.rs`

#![allow(non_snake_case)]

use std::net::Ipv4Addr;

use crate::data::fwevent::{
    addr_to_string,
    decode_address,
    Action,
    AddrOpt,
    Direction,
    FwEvent,
    Protocol,
    RawFwEvent,
    UNKNOWN_STR,
};
use crate::debug::helpers::addr_blob;

use ::test_case::test_case;

#[test_case(2, Protocol::Igmp, "IGMP")]
#[test_case(6, Protocol::Tcp, "TCP")]
#[test_case(17, Protocol::Udp, "UDP")]
#[test_case(0, Protocol::Unknown, "?")]
#[test_case(1, Protocol::Unknown, "?"; "icmp is unknown")]
#[test_case(-1, Protocol::Unknown, "?")]
fn test_Protocol_from_code(
    code: i64,
    expect: Protocol,
    expect_s: &str,
) {
    let protocol = Protocol::from_code(code);
    assert_eq!(protocol, expect);
    assert_eq!(protocol.to_string(), expect_s);
}

#[test_case(1, Direction::Outbound, "OUT")]
#[test_case(0, Direction::Inbound, "IN")]
#[test_case(2, Direction::Inbound, "IN"; "other is inbound")]
#[test_case(-7, Direction::Inbound, "IN"; "negative is inbound")]
fn test_Direction_from_code(
    code: i64,
    expect: Direction,
    expect_s: &str,
) {
    let direction = Direction::from_code(code);
    assert_eq!(direction, expect);
    assert_eq!(direction.to_string(), expect_s);
}

#[test_case(2, Action::Blocked, "Blocked")]
#[test_case(8, Action::Asked, "Asked")]
#[test_case(0, Action::Unknown, "?")]
#[test_case(4, Action::Unknown, "?")]
fn test_Action_from_code(
    code: i64,
    expect: Action,
    expect_s: &str,
) {
    let action = Action::from_code(code);
    assert_eq!(action, expect);
    assert_eq!(action.to_string(), expect_s);
}

#[test]
fn test_Display_pads() {
    assert_eq!(format!("[{:<7}]", Action::Asked), "[Asked  ]");
    assert_eq!(format!("[{:<4}]", Protocol::Tcp), "[TCP ]");
    assert_eq!(format!("[{:<3}]", Direction::Inbound), "[IN ]");
}

#[test_case(&[0, 0, 0, 0, 192, 168, 1, 10], Some(Ipv4Addr::new(192, 168, 1, 10)))]
#[test_case(&[0xFF, 0xFF, 0xFF, 0xFF, 10, 0, 0, 1], Some(Ipv4Addr::new(10, 0, 0, 1)); "noise prefix discarded")]
#[test_case(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], Some(Ipv4Addr::new(5, 6, 7, 8)); "long blob")]
#[test_case(&[192, 168, 1, 10], None; "short blob")]
#[test_case(&[0, 0, 0, 0, 192, 168, 1], None; "seven bytes")]
#[test_case(&[], None; "empty blob")]
fn test_decode_address(
    blob: &[u8],
    expect: AddrOpt,
) {
    assert_eq!(decode_address(blob), expect);
}

#[test]
fn test_addr_to_string() {
    assert_eq!(addr_to_string(&Some(Ipv4Addr::new(192, 168, 1, 10))), "192.168.1.10");
    assert_eq!(addr_to_string(&None), UNKNOWN_STR);
}

fn raw_example() -> RawFwEvent {
    RawFwEvent {
        id: 7,
        logdate: String::from("2013-04-01 12:00:00"),
        path: String::from("C:\\app.exe"),
        pid: 1234,
        protocol: 6,
        direction: 1,
        srcport: 50000,
        dstport: 443,
        action: 8,
        srcaddr: Some(addr_blob([192, 168, 1, 10])),
        dstaddr: Some(addr_blob([10, 0, 0, 1])),
    }
}

#[test]
fn test_FwEvent_decode() {
    let fwevent = FwEvent::decode(raw_example());
    assert_eq!(fwevent.id, 7);
    assert_eq!(fwevent.logdate, "2013-04-01 12:00:00");
    assert_eq!(fwevent.path, "C:\\app.exe");
    assert_eq!(fwevent.pid, 1234);
    assert_eq!(fwevent.protocol, Protocol::Tcp);
    assert_eq!(fwevent.direction, Direction::Outbound);
    assert_eq!(fwevent.action, Action::Asked);
    assert_eq!(fwevent.srcaddr_string(), "192.168.1.10");
    assert_eq!(fwevent.srcport, 50000);
    assert_eq!(fwevent.dstaddr_string(), "10.0.0.1");
    assert_eq!(fwevent.dstport, 443);
}

/// destination address is decoded from its own column, not the source
#[test]
fn test_FwEvent_decode_dstaddr_distinct() {
    let fwevent: FwEvent = raw_example().into();
    assert_ne!(fwevent.srcaddr, fwevent.dstaddr);
    assert_eq!(fwevent.dstaddr, Some(Ipv4Addr::new(10, 0, 0, 1)));
}

#[test]
fn test_FwEvent_decode_missing_addresses() {
    let mut raw = raw_example();
    raw.srcaddr = None;
    raw.dstaddr = Some(vec![1, 2, 3]);
    let fwevent = FwEvent::decode(raw);
    assert_eq!(fwevent.srcaddr, None);
    assert_eq!(fwevent.dstaddr, None);
    assert_eq!(fwevent.srcaddr_string(), "?");
    assert_eq!(fwevent.dstaddr_string(), "?");
}

#[test]
fn test_FwEvent_decode_default_raw() {
    let fwevent = FwEvent::decode(RawFwEvent::default());
    assert_eq!(fwevent.protocol, Protocol::Unknown);
    assert_eq!(fwevent.direction, Direction::Inbound);
    assert_eq!(fwevent.action, Action::Unknown);
    assert_eq!(fwevent.path, "");
}
