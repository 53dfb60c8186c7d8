//! Chaincode version allocation.
//!
//! Versions are `v` followed by the local wall-clock time at second
//! granularity, so they sort in deployment order. Two deployments within the
//! same second get the same version; that collision is accepted.

use chrono::{Local, NaiveDateTime};

const VERSION_FORMAT: &str = "v%Y%m%d%H%M%S";

/// Source of the current time.
pub trait Clock {
  fn now(&self) -> NaiveDateTime;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> NaiveDateTime {
    Local::now().naive_local()
  }
}

pub fn allocate_version(now: NaiveDateTime) -> String {
  now.format(VERSION_FORMAT).to_string()
}
