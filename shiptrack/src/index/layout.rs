use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::index::{NodeId, OrderedIndexTree};
use crate::shipment::ShipmentId;

/// A 2-D coordinate assigned to a tree node for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One renderable node: identifier, display label, coordinate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphNode {
    pub id: ShipmentId,
    pub label: String,
    pub position: Point,
}

/// Node/edge view of the ordered tree, ready for an external renderer.
///
/// Nodes appear in in-order (ascending identifier) sequence; each edge is a
/// `(parent, child)` identifier pair.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<(ShipmentId, ShipmentId)>,
}

/// Assigns every node of the tree a deterministic, collision-free coordinate.
///
/// With `h` the tree height, the drawing area is `total_width = 2^(h−1)·2 − 1`
/// columns wide. The recursion starts at the root with `y = h` and a
/// horizontal step of `total_width / 2`; each node sits at `(x, y)`, its left
/// child at `(x − step/2, y − 1)` and its right child at `(x + step/2, y − 1)`,
/// halving the step per level. The layout only depends on the tree's shape, so
/// it is stable across runs; it is meant to be computed after
/// [`OrderedIndexTree::rebalance`].
///
/// The returned map iterates in in-order (ascending identifier) sequence.
pub fn layout(tree: &OrderedIndexTree) -> IndexMap<ShipmentId, Point> {
    let mut positions = IndexMap::with_capacity(tree.len());
    let Some(root) = tree.root() else {
        return positions;
    };

    let height = tree.height();
    let total_width = 2f64.powi(height as i32 - 1) * 2.0 - 1.0;
    let step = total_width / 2.0;
    assign_positions(tree, root, step / 2.0, height as f64, step, &mut positions);
    positions
}

fn assign_positions(
    tree: &OrderedIndexTree,
    node: NodeId,
    x: f64,
    y: f64,
    step: f64,
    positions: &mut IndexMap<ShipmentId, Point>,
) {
    if let Some(left) = tree.left_of(node) {
        assign_positions(tree, left, x - step / 2.0, y - 1.0, step / 2.0, positions);
    }
    if let Some(key) = tree.key_of(node) {
        positions.insert(key, Point { x, y });
    }
    if let Some(right) = tree.right_of(node) {
        assign_positions(tree, right, x + step / 2.0, y - 1.0, step / 2.0, positions);
    }
}

/// Parent→child identifier pairs for every edge of the tree, in in-order
/// sequence of the parent nodes.
pub fn edges(tree: &OrderedIndexTree) -> Vec<(ShipmentId, ShipmentId)> {
    let mut result = Vec::new();
    if let Some(root) = tree.root() {
        collect_edges(tree, root, &mut result);
    }
    result
}

fn collect_edges(tree: &OrderedIndexTree, node: NodeId, result: &mut Vec<(ShipmentId, ShipmentId)>) {
    let Some(parent_key) = tree.key_of(node) else {
        return;
    };
    if let Some(left) = tree.left_of(node) {
        collect_edges(tree, left, result);
    }
    if let Some(left_key) = tree.left_of(node).and_then(|left| tree.key_of(left)) {
        result.push((parent_key, left_key));
    }
    if let Some(right_key) = tree.right_of(node).and_then(|right| tree.key_of(right)) {
        result.push((parent_key, right_key));
    }
    if let Some(right) = tree.right_of(node) {
        collect_edges(tree, right, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[ShipmentId]) -> OrderedIndexTree {
        let mut tree = OrderedIndexTree::new();
        for &key in keys {
            tree.insert(key).unwrap();
        }
        tree
    }

    #[test]
    fn test_layout_empty_tree() {
        let tree = OrderedIndexTree::new();
        assert!(layout(&tree).is_empty());
        assert!(edges(&tree).is_empty());
    }

    #[test]
    fn test_layout_single_node() {
        let tree = tree_of(&[42]);
        let positions = layout(&tree);
        assert_eq!(positions.len(), 1);
        // height 1: total width 1, step 0.5, root at (0.25, 1)
        assert_eq!(positions[&42], Point { x: 0.25, y: 1.0 });
    }

    #[test]
    fn test_layout_three_node_tree() {
        let tree = tree_of(&[2, 1, 3]);
        let positions = layout(&tree);

        // height 2: total width 3, step 1.5, root at (0.75, 2)
        assert_eq!(positions[&2], Point { x: 0.75, y: 2.0 });
        assert_eq!(positions[&1], Point { x: 0.0, y: 1.0 });
        assert_eq!(positions[&3], Point { x: 1.5, y: 1.0 });

        // map iterates in in-order sequence
        let keys: Vec<ShipmentId> = positions.keys().copied().collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_layout_is_collision_free() {
        let mut tree = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
        tree.rebalance();
        let positions = layout(&tree);
        assert_eq!(positions.len(), 7);

        for (i, a) in positions.values().enumerate() {
            for b in positions.values().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_layout_deterministic() {
        let mut first = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        let mut second = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        first.rebalance();
        second.rebalance();
        assert_eq!(layout(&first), layout(&second));
    }

    #[test]
    fn test_edges_of_balanced_tree() {
        let tree = tree_of(&[2, 1, 3]);
        assert_eq!(edges(&tree), vec![(2, 1), (2, 3)]);
    }

    #[test]
    fn test_edges_count_is_node_count_minus_one() {
        let mut tree = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
        tree.rebalance();
        assert_eq!(edges(&tree).len(), 6);
    }
}
