//! Shared plumbing used across the crate.
//!
//! `Atomic<T>` is the crate's one synchronization primitive: a cloneable
//! read-write cell (`Arc<parking_lot::RwLock<T>>`) with closure-scoped
//! accessors. The store guards its whole state with a single `Atomic`, which
//! is what makes its multi-index writes atomic under sequential reentry.

mod cell;

pub use cell::*;
