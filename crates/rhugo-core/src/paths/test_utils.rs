//! Environment isolation for tests that read `RHUGO_*` variables.

use std::env;
use std::sync::{Mutex, PoisonError};

/// Serializes every test that touches the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with `vars` applied, restoring the previous values afterwards.
///
/// `None` removes a variable for the duration of the call. Restoration runs
/// even if `f` panics.
#[allow(unsafe_code)]
pub fn with_env<R>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> R) -> R {
    struct Restore(Vec<(String, Option<String>)>);

    impl Drop for Restore {
        fn drop(&mut self) {
            for (key, value) in self.0.drain(..).rev() {
                // SAFETY: ENV_LOCK is held by the enclosing call
                unsafe {
                    match value {
                        Some(v) => env::set_var(&key, v),
                        None => env::remove_var(&key),
                    }
                }
            }
        }
    }

    let _lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let mut restore = Restore(Vec::with_capacity(vars.len()));

    for (key, value) in vars {
        restore.0.push(((*key).to_string(), env::var(key).ok()));
        // SAFETY: ENV_LOCK serializes environment access across tests
        unsafe {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }

    f()
}
