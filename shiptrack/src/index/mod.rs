//! The access structures a store keeps synchronized.
//!
//! - [`OrderedIndexTree`]: binary search tree keyed by identifier, for
//!   sorted/filtered traversal, with on-demand rebalancing
//! - [`UrgencyQueue`]: min-ordered structure surfacing the most urgent
//!   shipment first
//! - [`layout`]/[`edges`]: deterministic 2-D coordinates and parent/child
//!   pairs for rendering the (rebalanced) tree
//!
//! These types index identifiers only; the records themselves live in the
//! store's authoritative table.

mod layout;
mod ordered_tree;
mod urgency_queue;

pub use layout::*;
pub use ordered_tree::*;
pub use urgency_queue::*;
