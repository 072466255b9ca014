//! Backend worker wiring for the editor session.
//!
//! This module exposes the command/event protocol plus the worker spawn
//! helper used by the session's logical thread.

mod protocol;
mod worker;

pub use protocol::{StoreCmd, StoreErrorSource, StoreEvent};
pub use worker::{spawn_store_worker, StoreHandle};
