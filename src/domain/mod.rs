//! Domain layer: pricing trees, rendering and delivery pricing
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod delivery;
pub mod error;
pub mod render;
pub mod tree;

pub use builder::{
    ComponentSpec, DeliveryMethod, DeliveryOption, DeliverySpec, OrderDocument, TreeBuilder,
};
pub use delivery::{
    CourierDelivery, Delivery, DeliveryExt, Express, Insurance, PickupDelivery, PostalDelivery,
    SmsNotification,
};
pub use error::{DomainError, DomainResult};
pub use render::{RenderLines, RenderStyle};
pub use tree::{Group, Item, NodeId, Order, PriceTree, PricedNode, TreeIterator, TreeNode};
