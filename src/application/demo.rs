//! Built-in sample orders and delivery combinations for `ordertree demo`.

use rust_decimal::Decimal;

use crate::domain::{
    CourierDelivery, Delivery, DeliveryExt, DomainResult, NodeId, PickupDelivery, PostalDelivery,
    PriceTree,
};

/// Sample orders sharing one tree.
#[derive(Debug)]
pub struct SampleOrders {
    pub tree: PriceTree,
    /// Order nodes in display order
    pub orders: Vec<NodeId>,
    /// `Inner box` of the third order, detached by the demo to show a live total
    pub removable: (NodeId, NodeId),
}

/// A named delivery chain.
#[derive(Debug)]
pub struct DeliveryExample {
    pub title: &'static str,
    pub delivery: Box<dyn Delivery>,
    /// Express share of the cost, when express handling is the outermost option
    pub surcharge: Option<Decimal>,
}

impl DeliveryExample {
    fn new(title: &'static str, delivery: impl Delivery + 'static) -> Self {
        Self {
            title,
            delivery: Box::new(delivery),
            surcharge: None,
        }
    }
}

fn rub(amount: i64) -> Decimal {
    Decimal::from(amount)
}

/// Build the three sample orders.
pub fn sample_orders() -> DomainResult<SampleOrders> {
    let mut tree = PriceTree::new();

    // ORD-2024-001: nested boxes
    let first = tree.order("ORD-2024-001");
    let mouse_pad = tree.item("Mouse pad", rub(800));
    tree.add(first, mouse_pad)?;

    let large_box = tree.group("Large box");
    let laptop = tree.item("Laptop", rub(50_000));
    tree.add(large_box, laptop)?;

    let medium_box = tree.group("Medium box");
    let small_box_1 = tree.group("Small box 1");
    let mouse = tree.item("Mouse", rub(1_500));
    let keyboard = tree.item("Keyboard", rub(3_000));
    tree.add(small_box_1, mouse)?;
    tree.add(small_box_1, keyboard)?;

    let small_box_2 = tree.group("Small box 2");
    let headphones = tree.item("Headphones", rub(7_000));
    let charger = tree.item("Charger", rub(2_500));
    tree.add(small_box_2, headphones)?;
    tree.add(small_box_2, charger)?;

    tree.add(medium_box, small_box_1)?;
    tree.add(medium_box, small_box_2)?;
    tree.add(large_box, medium_box)?;
    tree.add(first, large_box)?;

    let hdd = tree.item("External HDD", rub(6_000));
    tree.add(first, hdd)?;

    // ORD-2024-002: flat
    let second = tree.order("ORD-2024-002");
    let book = tree.item("Book", rub(500));
    let pen = tree.item("Pen", rub(50));
    tree.add(second, book)?;
    tree.add(second, pen)?;

    // ORD-2024-003: two levels
    let third = tree.order("ORD-2024-003");
    let outer = tree.group("Outer box");
    let large_item = tree.item("Large item", rub(1_000));
    tree.add(outer, large_item)?;
    let inner = tree.group("Inner box");
    let small_1 = tree.item("Small item 1", rub(100));
    let small_2 = tree.item("Small item 2", rub(200));
    tree.add(inner, small_1)?;
    tree.add(inner, small_2)?;
    tree.add(outer, inner)?;
    tree.add(third, outer)?;

    Ok(SampleOrders {
        tree,
        orders: vec![first, second, third],
        removable: (outer, inner),
    })
}

/// Delivery methods alone and with stacked options.
pub fn delivery_examples() -> Vec<DeliveryExample> {
    let express = CourierDelivery::new(rub(300), 15).express("DHL Express");
    let surcharge = express.surcharge();

    vec![
        DeliveryExample::new("Courier", CourierDelivery::new(rub(300), 15)),
        DeliveryExample::new("Postal", PostalDelivery::new(rub(200))),
        DeliveryExample::new("Pickup", PickupDelivery::new("10 Lenin St")),
        DeliveryExample {
            surcharge: Some(surcharge),
            ..DeliveryExample::new("Express courier", express)
        },
        DeliveryExample::new(
            "Courier with every option",
            CourierDelivery::new(rub(300), 15)
                .express("DHL Express")
                .insured(Decimal::new(3, 2))
                .with_sms(Decimal::TEN),
        ),
        DeliveryExample::new(
            "Insured express EMS",
            PostalDelivery::with_service(rub(150), "EMS")
                .insured(Decimal::new(1, 1))
                .express("FedEx")
                .with_sms(rub(15)),
        ),
        DeliveryExample::new(
            "Pickup with SMS",
            PickupDelivery::new("Mega mall, 2nd floor").with_sms(Decimal::TEN),
        ),
    ]
}
