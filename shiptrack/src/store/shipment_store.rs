use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::common::{atomic, Atomic, ReadExecutor, WriteExecutor};
use crate::errors::{ErrorKind, ShiptrackError, ShiptrackResult};
use crate::index::{
    edges, layout, urgency_key, GraphNode, OrderedIndexTree, Point, TreeGraph, UrgencyQueue,
};
use crate::shipment::{DeliveryStatus, Shipment, ShipmentId};

/// The multi-index shipment store.
///
/// # Purpose
/// `ShipmentStore` owns one authoritative table of shipments plus four
/// derived access structures, and keeps all of them consistent on every
/// write:
///
/// - an identifier-keyed table (O(1) expected lookup, authoritative owner of
///   every record)
/// - sender and recipient grouping tables (identifier lists per key)
/// - an urgency queue over priority-flagged shipments
/// - an ordered tree keyed by identifier, for sorted/filtered traversal
///
/// Each read query dispatches to the structure best suited to it: identifier
/// lookups hit the table, recipient queries hit their grouping table, sender
/// queries run a filtered in-order traversal of the tree (ascending
/// identifier order), and the most urgent shipment comes from the queue.
///
/// # Consistency
/// The derived structures hold identifiers, never record copies, so a status
/// update in the table is instantly visible through every index. The whole
/// mutation path of [`add`](ShipmentStore::add) and
/// [`update_status`](ShipmentStore::update_status) runs under one write lock:
/// no caller can observe a half-registered shipment, and a rejected `add`
/// touches nothing.
///
/// # Sharing
/// The handle is cheap to clone; clones share the same store. All operations
/// take `&self`, and the internal lock makes the handle `Send + Sync`.
///
/// # Examples
///
/// ```rust,ignore
/// use shiptrack::store::ShipmentStore;
///
/// let store = ShipmentStore::new();
/// store.add(shipment)?;
/// let found = store.get_by_id(1);
/// let urgent = store.peek_urgent();
/// ```
#[derive(Clone, Default)]
pub struct ShipmentStore {
    inner: Arc<ShipmentStoreInner>,
}

impl std::fmt::Debug for ShipmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShipmentStore").finish_non_exhaustive()
    }
}

impl ShipmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ShipmentStore {
            inner: Arc::new(ShipmentStoreInner::new()),
        }
    }

    /// Starts a [`ShipmentStoreBuilder`] for seeding a store.
    pub fn builder() -> ShipmentStoreBuilder {
        ShipmentStoreBuilder::new()
    }

    /// Registers a shipment in every index.
    ///
    /// Effects: identifier table insert, sender group append, recipient group
    /// append, tree insert, and an urgency queue push when the shipment is
    /// priority-flagged. All of them happen, or none.
    ///
    /// # Errors
    /// Returns [`ErrorKind::DuplicateId`] when a shipment with the same
    /// identifier is already registered; the store is left untouched.
    pub fn add(&self, shipment: Shipment) -> ShiptrackResult<()> {
        self.inner.add(shipment)
    }

    /// Replaces the delivery status of a registered shipment.
    ///
    /// If the shipment is priority-flagged, the urgency queue is re-ordered
    /// unconditionally afterwards: ordering keys may in general derive from
    /// mutable fields, and a heap does not notice in-place mutation.
    ///
    /// # Errors
    /// Returns [`ErrorKind::NotFound`] when no shipment has that identifier;
    /// the store is left unchanged.
    pub fn update_status(&self, id: ShipmentId, new_status: DeliveryStatus) -> ShiptrackResult<()> {
        self.inner.update_status(id, new_status)
    }

    /// The shipment with the given identifier, if registered.
    pub fn get_by_id(&self, id: ShipmentId) -> Option<Shipment> {
        self.inner.get_by_id(id)
    }

    /// All shipments from `sender`, in ascending identifier order.
    ///
    /// Served by a filtered in-order traversal of the ordered tree, not the
    /// sender grouping table, so the cost is proportional to the store size.
    pub fn get_by_sender(&self, sender: &str) -> Vec<Shipment> {
        self.inner.get_by_sender(sender)
    }

    /// All shipments to `recipient`, in the order they were added.
    pub fn get_by_recipient(&self, recipient: &str) -> Vec<Shipment> {
        self.inner.get_by_recipient(recipient)
    }

    /// A snapshot of the urgency queue.
    ///
    /// The snapshot holds every priority-flagged shipment's identifier; peek
    /// or drain it freely, the store's own queue is unaffected.
    pub fn priority_queue(&self) -> UrgencyQueue {
        self.inner.priority_queue()
    }

    /// The most urgent registered shipment, if any is priority-flagged.
    pub fn peek_urgent(&self) -> Option<Shipment> {
        self.inner.peek_urgent()
    }

    /// Every registered shipment, in identifier-table iteration order.
    ///
    /// That order is an implementation detail; for sorted output use
    /// [`get_by_sender`](ShipmentStore::get_by_sender) or the tree.
    pub fn get_all(&self) -> Vec<Shipment> {
        self.inner.get_all()
    }

    /// Number of registered shipments.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    pub fn contains(&self, id: ShipmentId) -> bool {
        self.inner.get_by_id(id).is_some()
    }

    /// All distinct senders seen so far, sorted.
    pub fn senders(&self) -> Vec<String> {
        self.inner.senders()
    }

    /// All distinct recipients seen so far, sorted.
    pub fn recipients(&self) -> Vec<String> {
        self.inner.recipients()
    }

    /// Whether the ordered tree currently satisfies the height-balance
    /// invariant.
    pub fn is_tree_balanced(&self) -> bool {
        self.inner.is_tree_balanced()
    }

    /// Height of the ordered tree.
    pub fn tree_height(&self) -> usize {
        self.inner.tree_height()
    }

    /// Rebalances the ordered tree in place.
    ///
    /// Content and in-order sequence are preserved; only the shape changes.
    /// Meant to be invoked once before layout/rendering, not per insert.
    pub fn rebalance_tree(&self) {
        self.inner.rebalance_tree()
    }

    /// Deterministic 2-D coordinates for every tree node.
    ///
    /// See [`crate::index::layout`]; call after
    /// [`rebalance_tree`](ShipmentStore::rebalance_tree) for a compact shape.
    pub fn tree_layout(&self) -> IndexMap<ShipmentId, Point> {
        self.inner.tree_layout()
    }

    /// Node/edge view of the tree for an external renderer.
    ///
    /// Each node carries its coordinate and an `"ID: <id>\nStatus: <status>"`
    /// label.
    pub fn tree_graph(&self) -> TreeGraph {
        self.inner.tree_graph()
    }
}

struct ShipmentStoreInner {
    state: Atomic<StoreState>,
}

#[derive(Default)]
struct StoreState {
    records: IndexMap<ShipmentId, Shipment>,
    by_sender: HashMap<String, Vec<ShipmentId>>,
    by_recipient: HashMap<String, Vec<ShipmentId>>,
    urgent: UrgencyQueue,
    tree: OrderedIndexTree,
}

impl Default for ShipmentStoreInner {
    fn default() -> Self {
        Self::new()
    }
}

impl ShipmentStoreInner {
    fn new() -> Self {
        ShipmentStoreInner {
            state: atomic(StoreState::default()),
        }
    }

    fn add(&self, shipment: Shipment) -> ShiptrackResult<()> {
        self.state.write_with(|state| {
            let id = shipment.id();
            if state.records.contains_key(&id) {
                log::error!("Shipment {} is already registered", id);
                return Err(ShiptrackError::new(
                    &format!("Shipment {} is already registered", id),
                    ErrorKind::DuplicateId,
                ));
            }

            // The tree goes first: its insert is the only fallible effect, so
            // an error here leaves the other indices untouched.
            state.tree.insert(id)?;

            state
                .by_sender
                .entry(shipment.sender().to_string())
                .or_default()
                .push(id);
            state
                .by_recipient
                .entry(shipment.recipient().to_string())
                .or_default()
                .push(id);
            if shipment.priority() {
                state.urgent.push(urgency_key(&shipment), id);
            }
            state.records.insert(id, shipment);

            log::debug!("Registered shipment {}", id);
            Ok(())
        })
    }

    fn update_status(&self, id: ShipmentId, new_status: DeliveryStatus) -> ShiptrackResult<()> {
        self.state.write_with(|state| {
            let Some(record) = state.records.get_mut(&id) else {
                log::error!("Shipment {} not found", id);
                return Err(ShiptrackError::new(
                    &format!("Shipment {} not found", id),
                    ErrorKind::NotFound,
                ));
            };

            record.set_status(new_status);
            log::debug!("Updated status of shipment {}", id);

            if record.priority() {
                let records = &state.records;
                state
                    .urgent
                    .reheapify(|held| records.get(&held).map(urgency_key));
            }
            Ok(())
        })
    }

    fn get_by_id(&self, id: ShipmentId) -> Option<Shipment> {
        self.state.read_with(|state| state.records.get(&id).cloned())
    }

    fn get_by_sender(&self, sender: &str) -> Vec<Shipment> {
        self.state.read_with(|state| {
            let records = &state.records;
            let ids = state
                .tree
                .in_order_filtered(|id| records.get(&id).is_some_and(|r| r.sender() == sender));
            ids.iter()
                .filter_map(|id| state.records.get(id).cloned())
                .collect()
        })
    }

    fn get_by_recipient(&self, recipient: &str) -> Vec<Shipment> {
        self.state.read_with(|state| {
            state
                .by_recipient
                .get(recipient)
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| state.records.get(id).cloned())
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    fn priority_queue(&self) -> UrgencyQueue {
        self.state.read_with(|state| state.urgent.clone())
    }

    fn peek_urgent(&self) -> Option<Shipment> {
        self.state.read_with(|state| {
            state
                .urgent
                .peek()
                .and_then(|entry| state.records.get(&entry.id).cloned())
        })
    }

    fn get_all(&self) -> Vec<Shipment> {
        self.state
            .read_with(|state| state.records.values().cloned().collect())
    }

    fn len(&self) -> usize {
        self.state.read_with(|state| state.records.len())
    }

    fn senders(&self) -> Vec<String> {
        self.state.read_with(|state| {
            let mut senders: Vec<String> = state.by_sender.keys().cloned().collect();
            senders.sort();
            senders
        })
    }

    fn recipients(&self) -> Vec<String> {
        self.state.read_with(|state| {
            let mut recipients: Vec<String> = state.by_recipient.keys().cloned().collect();
            recipients.sort();
            recipients
        })
    }

    fn is_tree_balanced(&self) -> bool {
        self.state.read_with(|state| state.tree.is_balanced())
    }

    fn tree_height(&self) -> usize {
        self.state.read_with(|state| state.tree.height())
    }

    fn rebalance_tree(&self) {
        self.state.write_with(|state| state.tree.rebalance())
    }

    fn tree_layout(&self) -> IndexMap<ShipmentId, Point> {
        self.state.read_with(|state| layout(&state.tree))
    }

    fn tree_graph(&self) -> TreeGraph {
        self.state.read_with(|state| {
            let positions = layout(&state.tree);
            let nodes = positions
                .iter()
                .filter_map(|(id, position)| {
                    state.records.get(id).map(|record| GraphNode {
                        id: *id,
                        label: format!("ID: {}\nStatus: {}", id, record.status()),
                        position: *position,
                    })
                })
                .collect();
            TreeGraph {
                nodes,
                edges: edges(&state.tree),
            }
        })
    }
}

/// Builder that seeds a [`ShipmentStore`] with initial shipments.
///
/// # Examples
///
/// ```rust,ignore
/// let store = ShipmentStore::builder()
///     .shipment(first)
///     .shipment(second)
///     .build()?;
/// ```
#[derive(Default)]
pub struct ShipmentStoreBuilder {
    shipments: Vec<Shipment>,
}

impl ShipmentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one shipment to the seed set.
    pub fn shipment(mut self, shipment: Shipment) -> Self {
        self.shipments.push(shipment);
        self
    }

    /// Adds a batch of shipments to the seed set.
    pub fn shipments(mut self, shipments: impl IntoIterator<Item = Shipment>) -> Self {
        self.shipments.extend(shipments);
        self
    }

    /// Builds the store, registering every seed shipment.
    ///
    /// # Errors
    /// Fails with [`ErrorKind::DuplicateId`] if two seeds share an
    /// identifier.
    pub fn build(self) -> ShiptrackResult<ShipmentStore> {
        let store = ShipmentStore::new();
        for shipment in self.shipments {
            store.add(shipment)?;
        }
        Ok(store)
    }
}
