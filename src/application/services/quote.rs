//! Order quoting service
//!
//! Loads order documents, builds their pricing trees and prices the order
//! together with its delivery.

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{NodeId, OrderDocument, PriceTree, RenderStyle, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// A document together with the tree built from it.
#[derive(Debug)]
pub struct LoadedOrder {
    pub document: OrderDocument,
    pub tree: PriceTree,
    /// Id of the order node inside `tree`
    pub order: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryQuote {
    pub description: String,
    pub cost: Decimal,
}

/// Priced order: rendered tree, order total, delivery and grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub rendered: String,
    pub order_total: Decimal,
    pub delivery: Option<DeliveryQuote>,
    pub grand_total: Decimal,
}

/// Service for loading, rendering and quoting order documents.
pub struct QuoteService {
    fs: Arc<dyn FileSystem>,
    style: RenderStyle,
}

impl QuoteService {
    pub fn new(fs: Arc<dyn FileSystem>, style: RenderStyle) -> Self {
        Self { fs, style }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Parse a TOML order document; `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> ApplicationResult<OrderDocument> {
        toml::from_str(content).map_err(|e| ApplicationError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read an order document and build its tree.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<LoadedOrder> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::DocumentNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read order document", path)?;
        let document = Self::parse(&content, path)?;
        let (tree, order) = TreeBuilder::new().build(&document)?;
        debug!("load: {} nodes in {}", tree.len(), path.display());
        Ok(LoadedOrder {
            document,
            tree,
            order,
        })
    }

    /// Render an order file, either as indented text or as a box-drawing tree.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, path: &Path, as_tree: bool) -> ApplicationResult<String> {
        let loaded = self.load(path)?;
        if as_tree {
            Ok(loaded
                .tree
                .to_term_tree(loaded.order, &self.style)?
                .to_string()
                .trim_end()
                .to_string())
        } else {
            Ok(loaded.tree.render(loaded.order, &self.style)?)
        }
    }

    /// Price an order file including its delivery.
    #[instrument(level = "debug", skip(self))]
    pub fn quote(&self, path: &Path) -> ApplicationResult<Quote> {
        let loaded = self.load(path)?;
        self.quote_loaded(&loaded)
    }

    /// Price an in-memory document including its delivery.
    pub fn quote_document(&self, document: &OrderDocument) -> ApplicationResult<Quote> {
        let (tree, order) = TreeBuilder::new().build(document)?;
        self.quote_loaded(&LoadedOrder {
            document: document.clone(),
            tree,
            order,
        })
    }

    fn quote_loaded(&self, loaded: &LoadedOrder) -> ApplicationResult<Quote> {
        let rendered = loaded.tree.render(loaded.order, &self.style)?;
        let order_total = loaded.tree.price(loaded.order)?;

        let delivery = match &loaded.document.delivery {
            Some(spec) => {
                let delivery = spec.build()?;
                Some(DeliveryQuote {
                    description: delivery.description(),
                    cost: delivery.cost(),
                })
            }
            None => None,
        };
        let grand_total = order_total + delivery.as_ref().map_or(Decimal::ZERO, |d| d.cost);
        debug!(
            "quote {}: order={} grand={}",
            loaded.document.number, order_total, grand_total
        );

        Ok(Quote {
            rendered,
            order_total,
            delivery,
            grand_total,
        })
    }
}
