//! # Shiptrack - Embedded Shipment Tracking Store
//!
//! Shiptrack is a lightweight, embedded, in-memory store for shipment records
//! that answers four query shapes efficiently: exact lookup by identifier,
//! all shipments from a sender, all shipments to a recipient, and the current
//! most urgent shipment.
//!
//! ## Key Features
//!
//! - **Embedded**: No separate server process, no persistence layer
//! - **Multi-Index**: One authoritative record table plus sender/recipient
//!   groupings, an urgency queue, and an ordered identifier tree, all kept
//!   consistent on every write
//! - **Ordered Traversal**: Sender queries come back in ascending identifier
//!   order from an in-order tree walk
//! - **On-Demand Rebalancing**: The tree rebalances with single rotations
//!   when asked, typically once before rendering
//! - **Deterministic Layout**: Every tree node gets a stable 2-D coordinate
//!   for downstream renderers
//! - **Clean API**: The store handle is cheap to clone and safe to share
//!   across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use shiptrack::shipment::{DeliveryStatus, Shipment};
//! use shiptrack::store::ShipmentStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ShipmentStore::new();
//!
//! let shipment = Shipment::builder()
//!     .id(1)
//!     .sender("Ashok")
//!     .recipient("Aswini")
//!     .status(DeliveryStatus::InTransit)
//!     .priority(true)
//!     .product_name("Shampoo")
//!     .distance_km(10.0)
//!     .build()?;
//! store.add(shipment)?;
//!
//! // Dispatches to the identifier table
//! let found = store.get_by_id(1);
//! assert!(found.is_some());
//!
//! // The most urgent shipment surfaces first
//! let urgent = store.peek_urgent();
//! assert_eq!(urgent.unwrap().id(), 1);
//!
//! // Mutations keep every index in step
//! store.update_status(1, DeliveryStatus::Delivered)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Rendering the Tree
//!
//! The ordered tree is exposed to visualization layers through the store:
//! check [`store::ShipmentStore::is_tree_balanced`], call
//! [`store::ShipmentStore::rebalance_tree`] when it is not, then take
//! [`store::ShipmentStore::tree_graph`] for labeled nodes, deterministic
//! coordinates and parent/child edges.
//!
//! ## Module Organization
//!
//! - [`shipment`] - The shipment value object, enumerations, builder, and the
//!   caller-side delivery estimation rule
//! - [`store`] - The multi-index store façade
//! - [`index`] - The ordered tree, urgency queue, and layout engine
//! - [`errors`] - Error types and result definitions
//! - [`common`] - Shared plumbing

pub mod common;
pub mod errors;
pub mod index;
pub mod shipment;
pub mod store;
