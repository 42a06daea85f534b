//! The store façade.
//!
//! [`ShipmentStore`] owns the authoritative shipment table and every derived
//! access structure, and is the only way to mutate them. Callers hold the
//! store as an explicit value (cloning shares state); there is no process-wide
//! instance.

mod shipment_store;

pub use shipment_store::*;
