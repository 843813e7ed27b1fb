//! Arena-backed pricing tree.
//!
//! Items, groups and orders all live in one generational arena and refer to
//! each other by [`NodeId`]. A node has at most one parent; containers keep
//! their children in insertion order. Prices are never cached: every call to
//! [`PriceTree::price`] walks the subtree again.

use std::collections::HashMap;

use generational_arena::{Arena, Index};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Identity of a node inside a [`PriceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

/// Leaf with a fixed price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub unit_price: Decimal,
}

/// Container whose price is the sum of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
}

/// Top-level container. Priced like a group, never nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub number: String,
}

/// Payload of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricedNode {
    Item(Item),
    Group(Group),
    Order(Order),
}

impl PricedNode {
    pub fn is_container(&self) -> bool {
        !matches!(self, PricedNode::Item(_))
    }

    /// Item/group name or order number.
    pub fn label(&self) -> &str {
        match self {
            PricedNode::Item(item) => &item.name,
            PricedNode::Group(group) => &group.name,
            PricedNode::Order(order) => &order.number,
        }
    }
}

/// Node stored in the arena.
#[derive(Debug)]
pub struct TreeNode {
    data: PricedNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl TreeNode {
    pub fn data(&self) -> &PricedNode {
        &self.data
    }

    /// Container holding this node, None for detached nodes
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of priced nodes.
///
/// Ownership is exclusive: a node can be attached to one container at a time,
/// and [`PriceTree::add`] refuses anything that would make a container contain
/// itself. Removed nodes stay in the arena, detached, until discarded.
#[derive(Debug, Default)]
pub struct PriceTree {
    arena: Arena<TreeNode>,
}

impl PriceTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Create a detached item.
    pub fn item(&mut self, name: impl Into<String>, unit_price: Decimal) -> NodeId {
        self.insert(PricedNode::Item(Item {
            name: name.into(),
            unit_price,
        }))
    }

    /// Create a detached, empty group.
    pub fn group(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(PricedNode::Group(Group { name: name.into() }))
    }

    /// Create an empty order.
    pub fn order(&mut self, number: impl Into<String>) -> NodeId {
        self.insert(PricedNode::Order(Order {
            number: number.into(),
        }))
    }

    #[instrument(level = "trace", skip(self))]
    fn insert(&mut self, data: PricedNode) -> NodeId {
        NodeId(self.arena.insert(TreeNode {
            data,
            parent: None,
            children: Vec::new(),
        }))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> DomainResult<&TreeNode> {
        self.get(id).ok_or(DomainError::NodeNotFound(id))
    }

    pub fn children(&self, id: NodeId) -> DomainResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    pub fn parent(&self, id: NodeId) -> DomainResult<Option<NodeId>> {
        Ok(self.node(id)?.parent())
    }

    /// Nodes that are not attached to any container.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(idx, _)| NodeId(idx))
    }

    /// Append `child` to the end of `parent`'s children.
    ///
    /// Fails fast, leaving the tree untouched, when `parent` is an item, when
    /// `child` is an order, when `child` is `parent` or one of its ancestors,
    /// or when `child` already sits in another container.
    #[instrument(level = "debug", skip(self))]
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        let parent_node = self.node(parent)?;
        if !parent_node.data.is_container() {
            return Err(DomainError::NotAContainer {
                id: parent,
                name: parent_node.data.label().to_string(),
            });
        }
        let child_node = self.node(child)?;
        if let PricedNode::Order(order) = &child_node.data {
            return Err(DomainError::OrderNotNestable {
                id: child,
                number: order.number.clone(),
            });
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(DomainError::CycleDetected {
                parent: parent_node.data.label().to_string(),
                child: child_node.data.label().to_string(),
            });
        }
        if child_node.parent.is_some() {
            return Err(DomainError::AlreadyAttached {
                id: child,
                name: child_node.data.label().to_string(),
            });
        }

        if let Some(node) = self.arena.get_mut(child.0) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent.0) {
            node.children.push(child);
        }
        debug!("attached {:?} to {:?}", child, parent);
        Ok(())
    }

    /// Detach the first occurrence of `child` from `parent`.
    ///
    /// Returns `Ok(false)` and changes nothing when `child` is not one of
    /// `parent`'s children.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> DomainResult<bool> {
        let parent_node = self
            .arena
            .get_mut(parent.0)
            .ok_or(DomainError::NodeNotFound(parent))?;
        if !parent_node.data.is_container() {
            return Err(DomainError::NotAContainer {
                id: parent,
                name: parent_node.data.label().to_string(),
            });
        }
        let Some(pos) = parent_node.children.iter().position(|&c| c == child) else {
            debug!("{:?} is not a child of {:?}, nothing to remove", child, parent);
            return Ok(false);
        };
        parent_node.children.remove(pos);
        if let Some(node) = self.arena.get_mut(child.0) {
            node.parent = None;
        }
        Ok(true)
    }

    /// Drop a node and its whole subtree from the arena.
    ///
    /// The node is detached from its container first. Returns the number of
    /// nodes dropped.
    #[instrument(level = "debug", skip(self))]
    pub fn discard(&mut self, id: NodeId) -> DomainResult<usize> {
        if let Some(parent) = self.parent(id)? {
            self.remove(parent, id)?;
        }
        let doomed: Vec<NodeId> = self.iter(id).map(|(node_id, _)| node_id).collect();
        for node_id in &doomed {
            self.arena.remove(node_id.0);
        }
        Ok(doomed.len())
    }

    /// Total price of a node: unit price for items, sum of the items below otherwise.
    #[instrument(level = "trace", skip(self))]
    pub fn price(&self, id: NodeId) -> DomainResult<Decimal> {
        self.node(id)?;
        Ok(self
            .iter(id)
            .filter_map(|(_, node)| match &node.data {
                PricedNode::Item(item) => Some(item.unit_price),
                PricedNode::Group(_) | PricedNode::Order(_) => None,
            })
            .sum())
    }

    /// Price of every node in the subtree rooted at `id`, from one bottom-up pass.
    pub(crate) fn subtotals(&self, id: NodeId) -> HashMap<NodeId, Decimal> {
        let preorder: Vec<(NodeId, &TreeNode)> = self.iter(id).collect();
        let mut totals = HashMap::with_capacity(preorder.len());
        // Reverse pre-order visits every child before its parent
        for (node_id, node) in preorder.into_iter().rev() {
            let total = match &node.data {
                PricedNode::Item(item) => item.unit_price,
                PricedNode::Group(_) | PricedNode::Order(_) => node
                    .children
                    .iter()
                    .filter_map(|child| totals.get(child))
                    .sum(),
            };
            totals.insert(node_id, total);
        }
        totals
    }

    /// Height of the subtree rooted at `id` (1 for a lone node).
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: NodeId) -> DomainResult<usize> {
        self.node(id)?;
        Ok(self.calculate_depth(id))
    }

    fn calculate_depth(&self, id: NodeId) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(id, 1)];
        while let Some((current, depth)) = stack.pop() {
            let Some(node) = self.get(current) else {
                continue;
            };
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|&child| (child, depth + 1)));
        }
        deepest
    }

    /// Item ids below `id` (or `id` itself if it is an item), in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn items(&self, id: NodeId) -> DomainResult<Vec<NodeId>> {
        self.node(id)?;
        Ok(self
            .iter(id)
            .filter(|(_, node)| !node.data.is_container())
            .map(|(node_id, _)| node_id)
            .collect())
    }

    /// Pre-order traversal of the subtree rooted at `id`.
    ///
    /// Yields nothing for an unknown id.
    pub fn iter(&self, id: NodeId) -> TreeIterator<'_> {
        TreeIterator::new(self, id)
    }

    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = self.get(of).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.get(id).and_then(|n| n.parent);
        }
        false
    }
}

pub struct TreeIterator<'a> {
    tree: &'a PriceTree,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a PriceTree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push(start);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
