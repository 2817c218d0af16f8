// Copyright 2026 the flakegen authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use thiserror::Error;

/// Convenience type alias for boxed dynamic errors.
pub type BoxDynError = Box<dyn StdError + 'static + Send + Sync>;

/// The error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("clock moved backwards, refusing to generate an id for {backwards_ms} milliseconds")]
    ClockRegression { backwards_ms: i64 },
    #[error("data_center_id `{0}` does not fit in 5 bits")]
    DataCenterIdOutOfRange(u8),
    #[error("worker_id `{0}` does not fit in 5 bits")]
    WorkerIdOutOfRange(u8),
    #[error("epoch `{0}` is ahead of current time")]
    EpochAheadOfCurrentTime(DateTime<Utc>),
    #[error("over the time limit")]
    OverTimeLimit,
    #[error("mutex is poisoned (i.e. a panic happened while it was locked)")]
    MutexPoisoned,
}
