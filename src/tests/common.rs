// src/tests/common.rs

//! Shared test stores and constants.
//!
//! The stores here are created once and only read afterwards. Tests that
//! append rows must create their own store with
//! [`create_temp_store_ids`].
//!
//! [`create_temp_store_ids`]: crate::debug::helpers::create_temp_store_ids

use crate::common::{FPath, RowId};
use crate::debug::helpers::{create_temp_store, create_temp_store_ids, ntf_fpath, NamedTempFile};

use ::lazy_static::lazy_static;

/// Number of rows in [`NTF_STORE_25`].
pub const STORE_25_COUNT: RowId = 25;

lazy_static! {
    /// store with an empty `fwevents` table
    pub static ref NTF_STORE_EMPTY: NamedTempFile = create_temp_store();
    pub static ref NTF_STORE_EMPTY_FPATH: FPath = ntf_fpath(&NTF_STORE_EMPTY);

    /// store with ids `1..=25`
    pub static ref NTF_STORE_25: NamedTempFile = {
        let ids: Vec<RowId> = (1..=STORE_25_COUNT).collect();
        create_temp_store_ids(&ids)
    };
    pub static ref NTF_STORE_25_FPATH: FPath = ntf_fpath(&NTF_STORE_25);

    /// store with ids that have gaps, inserted out of order
    pub static ref NTF_STORE_GAPS: NamedTempFile = create_temp_store_ids(&[40, 2, 7, 100, 13]);
    pub static ref NTF_STORE_GAPS_FPATH: FPath = ntf_fpath(&NTF_STORE_GAPS);

    /// path that does not exist
    pub static ref STORE_NE_FPATH: FPath = {
        let mut path = std::env::temp_dir();
        path.push("tail-comodo-test-does-not-exist");
        path.push("cislogs.sdb");
        FPath::from(path.to_string_lossy())
    };
}
