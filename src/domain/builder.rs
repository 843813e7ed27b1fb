//! Order documents and the builder that turns them into pricing trees.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::delivery::{
    default_insurance_rate, default_sms_fee, CourierDelivery, Delivery, Express, Insurance,
    PickupDelivery, PostalDelivery, SmsNotification, DEFAULT_EXPRESS_SERVICE,
};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{NodeId, PriceTree};

/// Declarative description of an order, as stored in order files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDocument {
    pub number: String,
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
    #[serde(default)]
    pub delivery: Option<DeliverySpec>,
}

/// One node of an order document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComponentSpec {
    Item {
        name: String,
        price: Decimal,
    },
    Group {
        name: String,
        #[serde(default)]
        children: Vec<ComponentSpec>,
    },
}

/// Delivery method plus the options stacked on top of it, innermost first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverySpec {
    #[serde(flatten)]
    pub method: DeliveryMethod,
    #[serde(default)]
    pub options: Vec<DeliveryOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum DeliveryMethod {
    Courier {
        base_cost: Decimal,
        distance_km: u32,
    },
    Postal {
        base_cost: Decimal,
        #[serde(default)]
        service: Option<String>,
    },
    Pickup {
        point: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeliveryOption {
    Express {
        #[serde(default)]
        service: Option<String>,
    },
    Insurance {
        #[serde(default)]
        rate: Option<Decimal>,
    },
    Sms {
        #[serde(default)]
        fee: Option<Decimal>,
    },
}

impl DeliverySpec {
    /// Build the boxed delivery chain: method first, then each option around it.
    pub fn build(&self) -> DomainResult<Box<dyn Delivery>> {
        let mut delivery: Box<dyn Delivery> = match &self.method {
            DeliveryMethod::Courier {
                base_cost,
                distance_km,
            } => {
                ensure_non_negative("base_cost", *base_cost)?;
                Box::new(CourierDelivery::new(*base_cost, *distance_km))
            }
            DeliveryMethod::Postal { base_cost, service } => {
                ensure_non_negative("base_cost", *base_cost)?;
                match service {
                    Some(service) => Box::new(PostalDelivery::with_service(*base_cost, service)),
                    None => Box::new(PostalDelivery::new(*base_cost)),
                }
            }
            DeliveryMethod::Pickup { point } => Box::new(PickupDelivery::new(point)),
        };

        for option in &self.options {
            delivery = match option {
                DeliveryOption::Express { service } => Box::new(Express::new(
                    delivery,
                    service.as_deref().unwrap_or(DEFAULT_EXPRESS_SERVICE),
                )),
                DeliveryOption::Insurance { rate } => {
                    let rate = rate.unwrap_or_else(default_insurance_rate);
                    ensure_non_negative("rate", rate)?;
                    Box::new(Insurance::new(delivery, rate))
                }
                DeliveryOption::Sms { fee } => {
                    let fee = fee.unwrap_or_else(default_sms_fee);
                    ensure_non_negative("fee", fee)?;
                    Box::new(SmsNotification::new(delivery, fee))
                }
            };
        }
        Ok(delivery)
    }
}

fn ensure_non_negative(field: &str, value: Decimal) -> DomainResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::invalid_document(format!(
            "{} must not be negative: {}",
            field, value
        )));
    }
    Ok(())
}

/// Builds pricing trees from [`OrderDocument`]s.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: PriceTree,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the order node and all of its components.
    ///
    /// Returns the finished tree and the id of the order node.
    #[instrument(level = "debug", skip(self, document), fields(number = %document.number))]
    pub fn build(mut self, document: &OrderDocument) -> DomainResult<(PriceTree, NodeId)> {
        if document.number.trim().is_empty() {
            return Err(DomainError::invalid_document("order number is empty"));
        }
        let order = self.tree.order(document.number.clone());

        // Explicit work stack; reversed pushes keep each container's children in document order
        let mut pending: Vec<(NodeId, &ComponentSpec)> = document
            .components
            .iter()
            .rev()
            .map(|component| (order, component))
            .collect();
        while let Some((parent, spec)) = pending.pop() {
            let child = match spec {
                ComponentSpec::Item { name, price } => {
                    ensure_non_negative("price", *price)?;
                    self.tree.item(name.clone(), *price)
                }
                ComponentSpec::Group { name, children } => {
                    let group = self.tree.group(name.clone());
                    pending.extend(children.iter().rev().map(|child| (group, child)));
                    group
                }
            };
            self.tree.add(parent, child)?;
        }
        debug!("built order with {} nodes", self.tree.len());
        Ok((self.tree, order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: i64) -> ComponentSpec {
        ComponentSpec::Item {
            name: name.into(),
            price: Decimal::from(price),
        }
    }

    #[test]
    fn given_document_when_building_then_order_total_matches() {
        let document = OrderDocument {
            number: "ORD-2024-003".into(),
            components: vec![ComponentSpec::Group {
                name: "Outer box".into(),
                children: vec![
                    item("Large item", 1000),
                    ComponentSpec::Group {
                        name: "Inner box".into(),
                        children: vec![item("Small item 1", 100), item("Small item 2", 200)],
                    },
                ],
            }],
            delivery: None,
        };

        let (tree, order) = TreeBuilder::new().build(&document).unwrap();

        assert_eq!(tree.price(order).unwrap(), Decimal::from(1300));
        assert_eq!(tree.depth(order).unwrap(), 4);
        assert_eq!(tree.items(order).unwrap().len(), 3);
    }

    #[test]
    fn given_nested_groups_when_building_then_children_keep_document_order() {
        let document = OrderDocument {
            number: "ORD-2024-001".into(),
            components: vec![
                item("Mouse pad", 800),
                ComponentSpec::Group {
                    name: "Large box".into(),
                    children: vec![
                        item("Laptop", 50_000),
                        ComponentSpec::Group {
                            name: "Small box".into(),
                            children: vec![item("Mouse", 1_500), item("Keyboard", 3_000)],
                        },
                        item("Charger", 2_500),
                    ],
                },
                item("External HDD", 6_000),
            ],
            delivery: None,
        };

        let (tree, order) = TreeBuilder::new().build(&document).unwrap();

        let labels: Vec<&str> = tree
            .iter(order)
            .map(|(_, node)| node.data().label())
            .collect();
        assert_eq!(
            labels,
            vec![
                "ORD-2024-001",
                "Mouse pad",
                "Large box",
                "Laptop",
                "Small box",
                "Mouse",
                "Keyboard",
                "Charger",
                "External HDD",
            ]
        );
    }

    #[test]
    fn given_blank_number_when_building_then_invalid_document() {
        let document = OrderDocument {
            number: "  ".into(),
            components: vec![],
            delivery: None,
        };

        let err = TreeBuilder::new().build(&document).unwrap_err();
        assert!(matches!(err, DomainError::InvalidDocument { .. }));
    }

    #[test]
    fn given_negative_price_when_building_then_invalid_document() {
        let document = OrderDocument {
            number: "ORD-1".into(),
            components: vec![item("Refund", -5)],
            delivery: None,
        };

        assert!(TreeBuilder::new().build(&document).is_err());
    }

    #[test]
    fn given_delivery_section_when_building_then_options_apply_in_order() {
        let spec = DeliverySpec {
            method: DeliveryMethod::Pickup {
                point: "Mega mall, 2nd floor".into(),
            },
            options: vec![DeliveryOption::Sms { fee: None }],
        };

        let delivery = spec.build().unwrap();

        assert_eq!(delivery.cost(), Decimal::TEN);
        assert_eq!(
            delivery.description(),
            "Pickup from point: Mega mall, 2nd floor + SMS notifications"
        );
    }
}
