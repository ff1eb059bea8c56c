//! Learned index (RMI) over sorted integer keys.
//!
//! A two-level cascade of linear models replaces tree traversal with
//! statistical prediction plus a bounded local correction scan:
//!
//! ```text
//! key ──► level 0 (routing model) ──► segment s
//!                                        │
//!                                        ▼
//!              level 1[s] (position model) ──► predicted position p
//!                                        │
//!                                        ▼
//!              linear scan of data[p - w ..= p + w], early exit
//! ```
//!
//! The index is trained once over a fully-sorted static key array and is
//! immutable afterwards; there is no insert. Lookups for present keys are
//! exact; lookups for absent keys may be false negatives when the cascade
//! under-covers, but never false positives.

pub mod linear;
pub mod rmi;

pub use linear::LinearModel;
pub use rmi::{LearnedIndex, RmiStats};
