//! Delivery pricing: base methods wrapped by add-on options.
//!
//! Every option wraps another [`Delivery`] and adjusts its cost and
//! description, so options stack in any order and any number.

use std::fmt;

use rust_decimal::Decimal;

pub const DEFAULT_POSTAL_SERVICE: &str = "Russian Post";
pub const DEFAULT_EXPRESS_SERVICE: &str = "Express service";

/// Cost per kilometre for courier delivery.
pub fn courier_rate_per_km() -> Decimal {
    Decimal::TEN
}

pub fn default_insurance_rate() -> Decimal {
    Decimal::new(5, 2)
}

pub fn default_sms_fee() -> Decimal {
    Decimal::TEN
}

/// A way of getting an order to the customer.
pub trait Delivery: fmt::Debug {
    fn cost(&self) -> Decimal;
    fn description(&self) -> String;
}

impl Delivery for Box<dyn Delivery> {
    fn cost(&self) -> Decimal {
        (**self).cost()
    }

    fn description(&self) -> String {
        (**self).description()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourierDelivery {
    base_cost: Decimal,
    distance_km: u32,
}

impl CourierDelivery {
    pub fn new(base_cost: Decimal, distance_km: u32) -> Self {
        Self {
            base_cost,
            distance_km,
        }
    }
}

impl Delivery for CourierDelivery {
    fn cost(&self) -> Decimal {
        self.base_cost + Decimal::from(self.distance_km) * courier_rate_per_km()
    }

    fn description(&self) -> String {
        format!("Courier delivery ({} km)", self.distance_km)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalDelivery {
    base_cost: Decimal,
    service: String,
}

impl PostalDelivery {
    pub fn new(base_cost: Decimal) -> Self {
        Self::with_service(base_cost, DEFAULT_POSTAL_SERVICE)
    }

    pub fn with_service(base_cost: Decimal, service: impl Into<String>) -> Self {
        Self {
            base_cost,
            service: service.into(),
        }
    }
}

impl Delivery for PostalDelivery {
    fn cost(&self) -> Decimal {
        self.base_cost
    }

    fn description(&self) -> String {
        format!("Postal delivery ({})", self.service)
    }
}

/// Customer collects the order; always free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupDelivery {
    point: String,
}

impl PickupDelivery {
    pub fn new(point: impl Into<String>) -> Self {
        Self {
            point: point.into(),
        }
    }
}

impl Delivery for PickupDelivery {
    fn cost(&self) -> Decimal {
        Decimal::ZERO
    }

    fn description(&self) -> String {
        format!("Pickup from point: {}", self.point)
    }
}

/// Express handling: 50% on top of the wrapped cost.
#[derive(Debug)]
pub struct Express {
    wrapped: Box<dyn Delivery>,
    service: String,
}

impl Express {
    pub fn new(wrapped: Box<dyn Delivery>, service: impl Into<String>) -> Self {
        Self {
            wrapped,
            service: service.into(),
        }
    }

    /// Amount added by express handling alone.
    pub fn surcharge(&self) -> Decimal {
        self.wrapped.cost() * Decimal::new(5, 1)
    }
}

impl Delivery for Express {
    fn cost(&self) -> Decimal {
        self.wrapped.cost() * Decimal::new(15, 1)
    }

    fn description(&self) -> String {
        format!(
            "{} + Express delivery ({})",
            self.wrapped.description(),
            self.service
        )
    }
}

/// Insurance charged as a fraction of the wrapped cost.
#[derive(Debug)]
pub struct Insurance {
    wrapped: Box<dyn Delivery>,
    rate: Decimal,
}

impl Insurance {
    pub fn new(wrapped: Box<dyn Delivery>, rate: Decimal) -> Self {
        Self { wrapped, rate }
    }
}

impl Delivery for Insurance {
    fn cost(&self) -> Decimal {
        let base = self.wrapped.cost();
        base + base * self.rate
    }

    fn description(&self) -> String {
        format!(
            "{} + Insurance ({}%)",
            self.wrapped.description(),
            (self.rate * Decimal::ONE_HUNDRED).normalize()
        )
    }
}

/// Flat fee for SMS status notifications.
#[derive(Debug)]
pub struct SmsNotification {
    wrapped: Box<dyn Delivery>,
    fee: Decimal,
}

impl SmsNotification {
    pub fn new(wrapped: Box<dyn Delivery>, fee: Decimal) -> Self {
        Self { wrapped, fee }
    }
}

impl Delivery for SmsNotification {
    fn cost(&self) -> Decimal {
        self.wrapped.cost() + self.fee
    }

    fn description(&self) -> String {
        format!("{} + SMS notifications", self.wrapped.description())
    }
}

/// Chaining helpers: `CourierDelivery::new(..).express(..).insured(..)`.
pub trait DeliveryExt: Delivery + Sized + 'static {
    fn express(self, service: impl Into<String>) -> Express {
        Express::new(Box::new(self), service)
    }

    fn insured(self, rate: Decimal) -> Insurance {
        Insurance::new(Box::new(self), rate)
    }

    fn with_sms(self, fee: Decimal) -> SmsNotification {
        SmsNotification::new(Box::new(self), fee)
    }
}

impl<D: Delivery + 'static> DeliveryExt for D {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn given_courier_when_pricing_then_adds_distance_rate() {
        let courier = CourierDelivery::new(dec("300"), 15);
        assert_eq!(courier.cost(), dec("450"));
        assert_eq!(courier.description(), "Courier delivery (15 km)");
    }

    #[test]
    fn given_pickup_when_pricing_then_free() {
        let pickup = PickupDelivery::new("10 Lenin St");
        assert_eq!(pickup.cost(), Decimal::ZERO);
        assert_eq!(pickup.description(), "Pickup from point: 10 Lenin St");
    }

    #[test]
    fn given_express_when_pricing_then_surcharge_is_half_of_base() {
        let express = CourierDelivery::new(dec("300"), 15).express("DHL Express");
        assert_eq!(express.cost(), dec("675"));
        assert_eq!(express.surcharge(), dec("225"));
        assert_eq!(
            express.description(),
            "Courier delivery (15 km) + Express delivery (DHL Express)"
        );
    }

    #[test]
    fn given_insurance_when_describing_then_rate_is_normalized_percent() {
        let insured = PostalDelivery::with_service(dec("150"), "EMS").insured(dec("0.1"));
        assert_eq!(insured.cost(), dec("165"));
        assert_eq!(insured.description(), "Postal delivery (EMS) + Insurance (10%)");
    }
}
