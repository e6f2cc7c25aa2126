// src/readers/mod.rs

//! "Readers" for the Comodo Firewall store:
//! locate the store ([`storelocator`]), build queries ([`fwquery`]),
//! read rows ([`FwEventReader`]) and drive the tailing ([`FwLogProcessor`]).
//!
//! [`storelocator`]: crate::readers::storelocator
//! [`fwquery`]: crate::readers::fwquery
//! [`FwEventReader`]: crate::readers::fweventreader::FwEventReader
//! [`FwLogProcessor`]: crate::readers::fwlogprocessor::FwLogProcessor

pub mod fweventreader;
pub mod fwlogprocessor;
pub mod fwquery;
pub mod storelocator;
pub mod summary;
