use crate::builder::Builder;
use crate::error::*;
use chrono::prelude::*;
use rand::Rng;
use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

/// bit length of time
pub(crate) const BIT_LEN_TIME: u64 = 41;
/// bit length of the data center id
pub(crate) const BIT_LEN_DATA_CENTER_ID: u64 = 5;
/// bit length of the worker id
pub(crate) const BIT_LEN_WORKER_ID: u64 = 5;
/// bit length of sequence number
pub(crate) const BIT_LEN_SEQUENCE: u64 = 12;
/// mask for sequence number
pub(crate) const SEQUENCE_MASK: u16 = (1 << BIT_LEN_SEQUENCE) - 1;
/// mask for the data center id
pub(crate) const DATA_CENTER_ID_MASK: u8 = (1 << BIT_LEN_DATA_CENTER_ID) - 1;
/// mask for the worker id
pub(crate) const WORKER_ID_MASK: u8 = (1 << BIT_LEN_WORKER_ID) - 1;

/// Default epoch: 2019-11-29T10:32:41Z in milliseconds since the Unix epoch.
pub const DEFAULT_EPOCH_MILLIS: i64 = 1_575_023_561_000;

/// Each millisecond's sequence starts at a pseudo-random value in
/// `[0, SEQUENCE_JITTER_RANGE)` instead of 0, so the low bits of ids issued
/// at low rates are not trivially predictable.
pub(crate) const SEQUENCE_JITTER_RANGE: u16 = 10;

/// Internals of Snowflake.
/// This struct is not exposed to the public.
#[derive(Debug)]
pub(crate) struct Internals {
    pub(crate) elapsed_time: i64,
    pub(crate) sequence: u16,
}

/// SharedSnowflake is shared between Snowflake instances.
/// This struct is not exposed to the public.
pub(crate) struct SharedSnowflake {
    pub(crate) epoch_millis: i64,
    pub(crate) data_center_id: u8,
    pub(crate) worker_id: u8,
    pub(crate) internals: Mutex<Internals>,
}

/// Snowflake is a time-ordered unique ID generator.
/// It is thread-safe and can be cloned to be used in multiple threads.
pub struct Snowflake(pub(crate) Arc<SharedSnowflake>);

impl Snowflake {
    /// Create a new Snowflake for the given data center and worker.
    /// Both ids must fit in 5 bits, i.e. be in `[0, 31]`.
    /// For custom configuration see [`builder`].
    ///
    /// [`builder`]: struct.Snowflake.html#method.builder
    pub fn new(data_center_id: u8, worker_id: u8) -> Result<Self, Error> {
        Builder::new()
            .data_center_id(data_center_id)
            .worker_id(worker_id)
            .finalize()
    }

    /// Create a new [`Builder`] to construct a Snowflake.
    ///
    /// [`Builder`]: struct.Builder.html
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Create a new Snowflake with the given SharedSnowflake.
    pub(crate) fn new_inner(shared: Arc<SharedSnowflake>) -> Self {
        Self(shared)
    }

    /// Generate the next unique id.
    ///
    /// Fails with [`Error::ClockRegression`] if the system clock has moved
    /// behind the time of the last issued id; the internal state is left
    /// unchanged and the caller decides whether to retry.
    pub fn next_id(&self) -> Result<u64, Error> {
        let mut internals = self.0.internals.lock().map_err(|_| Error::MutexPoisoned)?;

        let current = current_elapsed_time(self.0.epoch_millis);
        if internals.elapsed_time > current {
            return Err(Error::ClockRegression {
                backwards_ms: internals.elapsed_time - current,
            });
        }

        if internals.elapsed_time == current {
            internals.sequence = advance_sequence(internals.sequence) & SEQUENCE_MASK;
            if internals.sequence == 0 {
                // The 12-bit counter wrapped within one millisecond. Move to
                // the next millisecond and sleep until the wall clock reaches
                // it, throttling callers while the lock is held.
                internals.elapsed_time += 1;
                let overtime = internals.elapsed_time - current;
                thread::sleep(sleep_time(overtime));
            }
        } else {
            internals.elapsed_time = current;
            internals.sequence = advance_sequence(0);
        }

        if internals.elapsed_time >= 1 << BIT_LEN_TIME {
            return Err(Error::OverTimeLimit);
        }

        Ok(compose(
            internals.elapsed_time,
            self.0.data_center_id,
            self.0.worker_id,
            internals.sequence,
        ))
    }
}

/// Returns a new `Snowflake` referencing the same state as `self`.
/// This is used for concurrent use.
impl Clone for Snowflake {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Advance the per-millisecond sequence counter.
/// A sequence of 0 marks the start of a millisecond and draws the jitter
/// offset; any other value simply increments. The caller masks the result.
fn advance_sequence(sequence: u16) -> u16 {
    if sequence == 0 {
        rand::thread_rng().gen_range(0..SEQUENCE_JITTER_RANGE)
    } else {
        sequence + 1
    }
}

/// Returns the current elapsed time in milliseconds since the given epoch.
pub(crate) fn current_elapsed_time(epoch_millis: i64) -> i64 {
    Utc::now().timestamp_millis() - epoch_millis
}

/// Returns how long to sleep so the wall clock catches up with an elapsed
/// time that ran `overtime` milliseconds ahead on sequence exhaustion.
fn sleep_time(overtime: i64) -> Duration {
    Duration::from_millis(overtime as u64)
        - Duration::from_nanos((Utc::now().timestamp_subsec_nanos() % 1_000_000) as u64)
}

/// Pack the four fields into one 63-bit id.
///
/// Pure function, safe to call concurrently. The fields are not masked here:
/// the caller must keep `elapsed_millis` within 41 bits, the ids within
/// 5 bits each and `sequence` within 12 bits, or adjacent fields are
/// corrupted.
pub fn compose(elapsed_millis: i64, data_center_id: u8, worker_id: u8, sequence: u16) -> u64 {
    (elapsed_millis as u64) << (BIT_LEN_DATA_CENTER_ID + BIT_LEN_WORKER_ID + BIT_LEN_SEQUENCE)
        | (data_center_id as u64) << (BIT_LEN_WORKER_ID + BIT_LEN_SEQUENCE)
        | (worker_id as u64) << BIT_LEN_SEQUENCE
        | sequence as u64
}

/// DecomposedId is the parts of a Snowflake ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecomposedId {
    pub id: u64,
    /// Wall-clock milliseconds since the Unix epoch (elapsed time + epoch).
    pub timestamp: u64,
    pub data_center_id: u64,
    pub worker_id: u64,
    pub sequence: u64,
}

/// Break a Snowflake ID up into its parts, assuming the default epoch.
///
/// Pure function, the exact inverse of [`compose`]:
/// `decompose(compose(t, d, w, s))` recovers `(t + epoch, d, w, s)` for all
/// in-range inputs.
pub fn decompose(id: u64) -> DecomposedId {
    decompose_with_epoch(id, DEFAULT_EPOCH_MILLIS)
}

/// Break a Snowflake ID up into its parts against a caller-supplied epoch,
/// for ids issued by a generator built with a custom epoch.
pub fn decompose_with_epoch(id: u64, epoch_millis: i64) -> DecomposedId {
    let elapsed_time = id >> (BIT_LEN_DATA_CENTER_ID + BIT_LEN_WORKER_ID + BIT_LEN_SEQUENCE);
    DecomposedId {
        id,
        timestamp: elapsed_time + epoch_millis as u64,
        data_center_id: (id >> (BIT_LEN_WORKER_ID + BIT_LEN_SEQUENCE))
            & ((1 << BIT_LEN_DATA_CENTER_ID) - 1),
        worker_id: (id >> BIT_LEN_SEQUENCE) & ((1 << BIT_LEN_WORKER_ID) - 1),
        sequence: id & ((1 << BIT_LEN_SEQUENCE) - 1),
    }
}
