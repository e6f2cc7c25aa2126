// src/readers/fwlogprocessor.rs

//! Implements a [`FwLogProcessor`], the driver of tailing the firewall log.
//!
//! A `FwLogProcessor` advances through the [`TailState`s]
//! `Init` → `Querying` → (`Sleeping` → `Querying` → …) → `Terminated`.
//!
//! For [`RunMode::ShowAll`] and [`RunMode::ShowLastN`] there is one
//! `Querying` stage. For [`RunMode::Follow`] `Querying` and `Sleeping`
//! repeat until a message arrives on the cancellation channel.
//!
//! [`TailState`s]: self::TailState

use std::fmt;
use std::thread;
use std::time::Duration;

use ::crossbeam_channel::{RecvTimeoutError, TryRecvError};
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

use crate::common::{
    Count,
    RowCount,
    RunMode,
    INTERVAL_SECS_DEFAULT,
    WINDOW_DEFAULT,
};
use crate::data::cursor::Cursor;
use crate::data::fwevent::FwEvent;
use crate::error::TailResult;
use crate::readers::fweventreader::FwEventReader;
use crate::readers::fwquery::FwQuery;
use crate::readers::summary::Summary;
use crate::v_out;

/// Sending side of the cancellation channel. Send `()` to request
/// termination.
pub type CancelSend = crossbeam_channel::Sender<()>;
/// Receiving side of the cancellation channel, held by the
/// [`FwLogProcessor`].
pub type CancelRecv = crossbeam_channel::Receiver<()>;

/// Create a cancellation channel.
pub fn cancel_channel() -> (CancelSend, CancelRecv) {
    crossbeam_channel::bounded(1)
}

/// Settings chosen once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TailConfig {
    pub mode: RunMode,
    /// Row count for `ShowLastN`, and the initial catch-up window for
    /// `Follow`.
    pub window: RowCount,
    /// Sleep between `Follow` polls. Must be greater than zero.
    pub interval: Duration,
    pub verbose: bool,
}

impl Default for TailConfig {
    fn default() -> Self {
        TailConfig {
            mode: RunMode::ShowLastN,
            window: WINDOW_DEFAULT,
            interval: Duration::from_secs(INTERVAL_SECS_DEFAULT),
            verbose: false,
        }
    }
}

/// States of a [`FwLogProcessor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TailState {
    Init,
    Querying,
    Sleeping,
    Terminated,
}

/// Drives a [`FwEventReader`] according to a [`TailConfig`].
///
/// Owns the [`Cursor`]. Rows are handed to the caller's sink in ascending
/// id order, within one poll and across polls.
pub struct FwLogProcessor {
    config: TailConfig,
    reader: FwEventReader,
    cursor: Cursor,
    state: TailState,
    cancel: CancelRecv,
    /// A cancellation message was received.
    cancelled: bool,
    /// `Count` of `Querying` stages run.
    pub(super) polls: Count,
    /// `Count` of polls that returned zero rows.
    pub(super) polls_empty: Count,
    /// `Count` of rows handed to the sink.
    pub(super) rows_emitted: Count,
    /// `Count` of `Sleeping` stages entered.
    pub(super) sleeps: Count,
}

impl fmt::Debug for FwLogProcessor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FwLogProcessor")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("cancelled", &self.cancelled)
            .finish()
    }
}

#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct SummaryFwLogProcessor {
    pub fwlogprocessor_polls: Count,
    pub fwlogprocessor_polls_empty: Count,
    pub fwlogprocessor_rows_emitted: Count,
    pub fwlogprocessor_sleeps: Count,
    pub fwlogprocessor_cursor: Cursor,
}

/// Non-blocking check of the cancellation channel. Remembers a received
/// message in `cancelled`.
fn check_cancel(
    cancel: &CancelRecv,
    cancelled: &mut bool,
) -> bool {
    if !*cancelled {
        match cancel.try_recv() {
            Ok(()) => {
                defñ!("cancel received");
                *cancelled = true;
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {}
        }
    }

    *cancelled
}

impl FwLogProcessor {
    pub fn new(
        config: TailConfig,
        reader: FwEventReader,
        cancel: CancelRecv,
    ) -> FwLogProcessor {
        defñ!("({:?}, {:?})", config, reader);
        debug_assert!(!config.interval.is_zero(), "interval must be greater than zero");

        FwLogProcessor {
            config,
            reader,
            cursor: Cursor::new(),
            state: TailState::Init,
            cancel,
            cancelled: false,
            polls: 0,
            polls_empty: 0,
            rows_emitted: 0,
            sleeps: 0,
        }
    }

    pub const fn state(&self) -> TailState {
        self.state
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn config(&self) -> &TailConfig {
        &self.config
    }

    pub const fn reader(&self) -> &FwEventReader {
        &self.reader
    }

    /// One `Querying` stage: build the query for the current cursor, run it,
    /// and pass each row to `sink`.
    ///
    /// Stops delivering early if cancellation is requested. Returns the
    /// number of rows delivered; zero is a normal result.
    pub fn poll<F>(
        &mut self,
        sink: &mut F,
    ) -> TailResult<Count>
    where
        F: FnMut(&FwEvent) -> std::io::Result<()>,
    {
        defn!("cursor {}", self.cursor);
        let query = FwQuery::build(self.config.mode, self.config.window, &self.cursor);
        defo!("query {}", query);
        let rows = self.reader.query(&query, &mut self.cursor)?;
        let mut delivered: Count = 0;
        for fwevent in rows {
            sink(&fwevent)?;
            delivered += 1;
            self.rows_emitted += 1;
            if check_cancel(&self.cancel, &mut self.cancelled) {
                defo!("cancelled after id {}", fwevent.id);
                break;
            }
        }
        check_cancel(&self.cancel, &mut self.cancelled);
        self.polls += 1;
        if delivered == 0 {
            self.polls_empty += 1;
        }
        defx!("delivered {}, cursor {}", delivered, self.cursor);

        Ok(delivered)
    }

    /// `Sleeping` stage. Wait the interval or until cancelled.
    /// Returns `true` if cancelled.
    fn sleep(&mut self) -> bool {
        self.sleeps += 1;
        if self.cancelled {
            return true;
        }
        match self.cancel.recv_timeout(self.config.interval) {
            Ok(()) => {
                defñ!("cancel received while sleeping");
                self.cancelled = true;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // nothing can send a cancel
                thread::sleep(self.config.interval);
            }
        }

        self.cancelled
    }

    fn run_stages<F>(
        &mut self,
        sink: &mut F,
    ) -> TailResult<()>
    where
        F: FnMut(&FwEvent) -> std::io::Result<()>,
    {
        loop {
            defo!("state {:?}", self.state);
            self.state = match self.state {
                TailState::Init => {
                    v_out!(self.config.verbose, "Tailing mode {}, window {}", self.config.mode, self.config.window);
                    TailState::Querying
                }
                TailState::Querying => {
                    self.poll(sink)?;
                    match self.config.mode {
                        RunMode::ShowAll | RunMode::ShowLastN => TailState::Terminated,
                        RunMode::Follow => match self.cancelled {
                            true => TailState::Terminated,
                            false => TailState::Sleeping,
                        },
                    }
                }
                TailState::Sleeping => match self.sleep() {
                    true => TailState::Terminated,
                    false => TailState::Querying,
                },
                TailState::Terminated => {
                    return Ok(());
                }
            };
        }
    }

    /// Run the stages until `Terminated`, passing each row to `sink`.
    ///
    /// Closes the store connection before returning, on success or error.
    pub fn run<F>(
        &mut self,
        sink: &mut F,
    ) -> TailResult<()>
    where
        F: FnMut(&FwEvent) -> std::io::Result<()>,
    {
        defn!("{:?}", self.config.mode);
        let ret = self.run_stages(sink);
        self.state = TailState::Terminated;
        let ret_close = self.reader.close();
        defx!("run {:?}, close {:?}", ret, ret_close);

        ret?;
        ret_close
    }

    /// Move to `Terminated` and close the store connection. Harmless if
    /// already terminated.
    pub fn terminate(&mut self) -> TailResult<()> {
        self.state = TailState::Terminated;

        self.reader.close()
    }

    pub fn summary_fwlogprocessor(&self) -> SummaryFwLogProcessor {
        SummaryFwLogProcessor {
            fwlogprocessor_polls: self.polls,
            fwlogprocessor_polls_empty: self.polls_empty,
            fwlogprocessor_rows_emitted: self.rows_emitted,
            fwlogprocessor_sleeps: self.sleeps,
            fwlogprocessor_cursor: self.cursor,
        }
    }

    pub fn summary(&self) -> Summary {
        Summary::new(
            self.reader.path().clone(),
            self.config.mode,
            self.reader.summary(),
            self.summary_fwlogprocessor(),
        )
    }
}
