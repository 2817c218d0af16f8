// Copyright 2026 the flakegen authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::Snowflake;
use crate::error::Error;
use crate::snowflake::{
    DATA_CENTER_ID_MASK, DEFAULT_EPOCH_MILLIS, Internals, SharedSnowflake, WORKER_ID_MASK,
};
use chrono::prelude::*;
use std::sync::{Arc, Mutex};

/// A builder for building the ['Snowflake'] generator.
///
/// [`Snowflake`]: struct.Snowflake.html
pub struct Builder {
    epoch: Option<DateTime<Utc>>,
    data_center_id: u8,
    worker_id: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

impl Builder {
    /// Construct a new builder for the build of ['Snowflake'].
    ///
    /// [`Snowflake`]: struct.Snowflake.html
    pub fn new() -> Self {
        Self {
            epoch: None,
            data_center_id: 0,
            worker_id: 0,
        }
    }

    /// Set the epoch the 41-bit timestamp field counts from.
    /// If the epoch is set later than the current time, `finalize` will fail.
    /// Ids issued against a custom epoch must be decomposed with
    /// [`decompose_with_epoch`].
    ///
    /// [`decompose_with_epoch`]: fn.decompose_with_epoch.html
    pub fn epoch(mut self, epoch: DateTime<Utc>) -> Self {
        self.epoch = Some(epoch);
        self
    }

    /// Set the data center ID. Must fit in 5 bits or `finalize` will fail.
    pub fn data_center_id(mut self, data_center_id: u8) -> Self {
        self.data_center_id = data_center_id;
        self
    }

    /// Set the worker ID. Must fit in 5 bits or `finalize` will fail.
    pub fn worker_id(mut self, worker_id: u8) -> Self {
        self.worker_id = worker_id;
        self
    }

    /// Finish building and create a Snowflake instance.
    /// This method will return an error if validation fails.
    pub fn finalize(self) -> Result<Snowflake, Error> {
        let epoch_millis = if let Some(epoch) = self.epoch {
            if epoch > Utc::now() {
                return Err(Error::EpochAheadOfCurrentTime(epoch));
            }
            epoch.timestamp_millis()
        } else {
            DEFAULT_EPOCH_MILLIS
        };

        if self.data_center_id > DATA_CENTER_ID_MASK {
            return Err(Error::DataCenterIdOutOfRange(self.data_center_id));
        }
        if self.worker_id > WORKER_ID_MASK {
            return Err(Error::WorkerIdOutOfRange(self.worker_id));
        }

        let shared = Arc::new(SharedSnowflake {
            epoch_millis,
            data_center_id: self.data_center_id,
            worker_id: self.worker_id,
            internals: Mutex::new(Internals {
                elapsed_time: 0,
                sequence: 0,
            }),
        });
        Ok(Snowflake::new_inner(shared))
    }
}
