pub mod accounts;
pub mod blacklist;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod foreground;
pub mod ledger;
pub mod models;
pub mod platform;
pub mod reward;
pub mod session;
pub mod stopwatch;
pub mod store;
#[cfg(test)]
mod test_utils;
pub mod wallet;

use log::warn;
use std::sync::{Mutex, MutexGuard};

pub use error::{AppError, Result};

/// Lock a mutex, recovering from poisoning if necessary
pub fn safe_lock<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("{context} mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}
