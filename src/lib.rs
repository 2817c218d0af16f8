//! A time-ordered unique ID generator in the style of [Twitter's Snowflake].
//!
//! Each id packs a 41-bit millisecond timestamp, a 5-bit data center id, a
//! 5-bit worker id and a 12-bit per-millisecond sequence into one 63-bit
//! integer. Processes assigned distinct (data center, worker) pairs generate
//! globally unique, time-ordered ids without any coordination service.
//!
//! ## Quickstart
//!
//! Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! flakegen = "0.1"
//! ```
//!
//! Use the library like this:
//!
//! ```
//! use flakegen::Snowflake;
//!
//! let sf = Snowflake::new(3, 7).unwrap();
//! let next_id = sf.next_id().unwrap();
//! println!("{}", next_id);
//! println!("{:?}", flakegen::decompose(next_id));
//! ```
//!
//! ## Concurrent use
//!
//! Snowflake is thread-safe. `clone` it before moving to another thread:
//! ```
//! use flakegen::Snowflake;
//! use std::thread;
//!
//! let sf = Snowflake::new(1, 1).unwrap();
//!
//! let mut children = Vec::new();
//! for _ in 0..10 {
//!     let thread_sf = sf.clone();
//!     children.push(thread::spawn(move || {
//!         println!("{}", thread_sf.next_id().unwrap());
//!     }));
//! }
//!
//! for child in children {
//!     child.join().unwrap();
//! }
//! ```
//!
//! [Twitter's Snowflake]: https://blog.twitter.com/2010/announcing-snowflake

mod builder;
mod error;
mod snowflake;

pub use crate::snowflake::{
    DEFAULT_EPOCH_MILLIS, DecomposedId, Snowflake, compose, decompose, decompose_with_epoch,
};
pub use builder::*;
pub use error::*;
