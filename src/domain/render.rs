//! Text rendering of pricing trees.
//!
//! Rendering is produced as a lazy sequence of lines ([`RenderLines`]) and
//! joined once at the end, so large trees do not rebuild the output string
//! at every level.

use std::collections::HashMap;

use itertools::Itertools;
use rust_decimal::{Decimal, RoundingStrategy};
use termtree::Tree;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{NodeId, PriceTree, PricedNode, TreeNode};

/// Labels, indentation and currency used when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    /// Spaces per depth level
    pub indent_width: usize,
    /// Appended to every price, e.g. "RUB"
    pub currency: Option<String>,
    pub item_label: String,
    pub group_label: String,
    pub total_price_label: String,
    pub order_label: String,
    pub contents_label: String,
    pub total_label: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            indent_width: 2,
            currency: None,
            item_label: "Item".into(),
            group_label: "Group".into(),
            total_price_label: "total price".into(),
            order_label: "Order".into(),
            contents_label: "Order contents".into(),
            total_label: "Total".into(),
        }
    }
}

impl RenderStyle {
    pub fn indent(&self, depth: usize) -> String {
        " ".repeat(self.indent_width * depth)
    }

    /// Format a price rounded to cents (half away from zero): whole amounts
    /// without decimals, others with two.
    pub fn price(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let number = if rounded.fract().is_zero() {
            rounded.trunc().to_string()
        } else {
            format!("{:.2}", rounded)
        };
        match &self.currency {
            Some(currency) => format!("{} {}", number, currency),
            None => number,
        }
    }
}

enum Frame {
    Node(NodeId, usize),
    Contents(usize),
    Footer(NodeId, usize),
}

/// Lazy iterator over the rendered lines of a subtree.
pub struct RenderLines<'a> {
    tree: &'a PriceTree,
    style: &'a RenderStyle,
    stack: Vec<Frame>,
    /// Subtree prices for this render only
    totals: HashMap<NodeId, Decimal>,
}

impl<'a> RenderLines<'a> {
    fn new(tree: &'a PriceTree, style: &'a RenderStyle, start: NodeId, depth: usize) -> Self {
        let mut stack = Vec::new();
        if tree.contains(start) {
            stack.push(Frame::Node(start, depth));
        }
        Self {
            tree,
            style,
            stack,
            totals: tree.subtotals(start),
        }
    }

    fn total(&self, id: NodeId) -> String {
        self.style
            .price(self.totals.get(&id).copied().unwrap_or_default())
    }

    fn push_children(&mut self, children: &[NodeId], depth: usize) {
        for &child in children.iter().rev() {
            self.stack.push(Frame::Node(child, depth));
        }
    }
}

impl<'a> Iterator for RenderLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Node(id, depth) => {
                    let tree = self.tree;
                    let Some(node) = tree.get(id) else {
                        continue;
                    };
                    let indent = self.style.indent(depth);
                    let line = match node.data() {
                        PricedNode::Item(item) => format!(
                            "{}{}: {} - {}",
                            indent,
                            self.style.item_label,
                            item.name,
                            self.style.price(item.unit_price)
                        ),
                        PricedNode::Group(group) => {
                            self.push_children(node.children(), depth + 1);
                            format!(
                                "{}{}: {} ({}: {})",
                                indent,
                                self.style.group_label,
                                group.name,
                                self.style.total_price_label,
                                self.total(id)
                            )
                        }
                        PricedNode::Order(order) => {
                            self.stack.push(Frame::Footer(id, depth));
                            self.push_children(node.children(), depth + 1);
                            self.stack.push(Frame::Contents(depth));
                            format!("{}{} #{}", indent, self.style.order_label, order.number)
                        }
                    };
                    return Some(line);
                }
                Frame::Contents(depth) => {
                    return Some(format!(
                        "{}{}:",
                        self.style.indent(depth),
                        self.style.contents_label
                    ));
                }
                Frame::Footer(id, depth) => {
                    if !self.tree.contains(id) {
                        continue;
                    }
                    return Some(format!(
                        "{}{}: {}",
                        self.style.indent(depth),
                        self.style.total_label,
                        self.total(id)
                    ));
                }
            }
        }
        None
    }
}

impl PriceTree {
    /// Rendered lines of the subtree rooted at `id`, starting at `depth`.
    pub fn lines<'a>(
        &'a self,
        id: NodeId,
        depth: usize,
        style: &'a RenderStyle,
    ) -> DomainResult<RenderLines<'a>> {
        self.node(id)?;
        Ok(RenderLines::new(self, style, id, depth))
    }

    /// Render the subtree rooted at `id` at depth 0.
    pub fn render(&self, id: NodeId, style: &RenderStyle) -> DomainResult<String> {
        self.render_at(id, 0, style)
    }

    /// Render the subtree rooted at `id` with its header indented for `depth`.
    ///
    /// Lines are joined with `\n`; trailing whitespace is trimmed.
    #[instrument(level = "debug", skip(self, style))]
    pub fn render_at(&self, id: NodeId, depth: usize, style: &RenderStyle) -> DomainResult<String> {
        let rendered = self.lines(id, depth, style)?.join("\n");
        Ok(rendered.trim_end().to_string())
    }

    /// Box-drawing view of the subtree rooted at `id`.
    ///
    /// Built bottom-up: every child's tree is finished before its parent's.
    #[instrument(level = "debug", skip(self, style))]
    pub fn to_term_tree(&self, id: NodeId, style: &RenderStyle) -> DomainResult<Tree<String>> {
        self.node(id)?;
        let totals = self.subtotals(id);
        let total = |node_id: NodeId| style.price(totals.get(&node_id).copied().unwrap_or_default());

        let preorder: Vec<(NodeId, &TreeNode)> = self.iter(id).collect();
        let mut built: HashMap<NodeId, Tree<String>> = HashMap::with_capacity(preorder.len());
        for (node_id, node) in preorder.into_iter().rev() {
            let label = match node.data() {
                PricedNode::Item(item) => {
                    format!("{} - {}", item.name, style.price(item.unit_price))
                }
                PricedNode::Group(group) => format!("{} ({})", group.name, total(node_id)),
                PricedNode::Order(order) => format!(
                    "{} #{} ({})",
                    style.order_label,
                    order.number,
                    total(node_id)
                ),
            };
            let leaves: Vec<Tree<String>> = node
                .children()
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(node_id, Tree::new(label).with_leaves(leaves));
        }

        built.remove(&id).ok_or(DomainError::NodeNotFound(id))
    }
}
