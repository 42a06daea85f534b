use chrono::{DateTime, Utc};

use crate::errors::{ErrorKind, ShiptrackError, ShiptrackResult};
use crate::shipment::{
    estimate_delivery_from_now, DeliveryStatus, PaymentMethod, Shipment, ShipmentId,
};

/// Fluent builder for [`Shipment`] values.
///
/// Identifier, sender, recipient and product name are required; everything
/// else has a sensible default. When no delivery time is supplied, `build`
/// derives one from the standard estimation rule
/// ([`crate::shipment::estimate_delivery`]), matching what an input layer
/// would compute before registering the shipment.
///
/// # Examples
///
/// ```rust,ignore
/// use shiptrack::shipment::{DeliveryStatus, Shipment};
///
/// let shipment = Shipment::builder()
///     .id(1)
///     .sender("Ashok")
///     .recipient("Aswini")
///     .product_name("Shampoo")
///     .status(DeliveryStatus::InTransit)
///     .priority(true)
///     .distance_km(10.0)
///     .build()?;
/// ```
#[derive(Debug, Default, Clone)]
pub struct ShipmentBuilder {
    id: Option<ShipmentId>,
    sender: Option<String>,
    recipient: Option<String>,
    status: Option<DeliveryStatus>,
    priority: bool,
    product_name: Option<String>,
    delivery_time: Option<DateTime<Utc>>,
    distance_km: f64,
    payment_method: Option<PaymentMethod>,
}

impl ShipmentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: ShipmentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn sender(mut self, sender: &str) -> Self {
        self.sender = Some(sender.to_string());
        self
    }

    pub fn recipient(mut self, recipient: &str) -> Self {
        self.recipient = Some(recipient.to_string());
        self
    }

    /// Defaults to [`DeliveryStatus::Pending`] when not set.
    pub fn status(mut self, status: DeliveryStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Flags the shipment as urgent. Defaults to `false`.
    pub fn priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    pub fn product_name(mut self, product_name: &str) -> Self {
        self.product_name = Some(product_name.to_string());
        self
    }

    /// Overrides the delivery time instead of deriving it from the
    /// estimation rule.
    pub fn delivery_time(mut self, delivery_time: DateTime<Utc>) -> Self {
        self.delivery_time = Some(delivery_time);
        self
    }

    /// Defaults to `0.0` when not set.
    pub fn distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = distance_km;
        self
    }

    /// Defaults to [`PaymentMethod::CashOnDelivery`] when not set.
    pub fn payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = Some(payment_method);
        self
    }

    /// Builds the shipment.
    ///
    /// # Errors
    /// Returns [`ErrorKind::InvalidOperation`] when a required field is
    /// missing, or [`ErrorKind::InvalidDataType`] when the distance is
    /// negative or not finite.
    pub fn build(self) -> ShiptrackResult<Shipment> {
        let id = self.id.ok_or_else(|| missing("id"))?;
        let sender = self.sender.ok_or_else(|| missing("sender"))?;
        let recipient = self.recipient.ok_or_else(|| missing("recipient"))?;
        let product_name = self.product_name.ok_or_else(|| missing("product name"))?;

        let status = self.status.unwrap_or(DeliveryStatus::Pending);
        let payment_method = self.payment_method.unwrap_or(PaymentMethod::CashOnDelivery);
        let delivery_time = self.delivery_time.unwrap_or_else(|| {
            estimate_delivery_from_now(&status, self.priority, self.distance_km)
        });

        Shipment::new(
            id,
            &sender,
            &recipient,
            status,
            self.priority,
            &product_name,
            delivery_time,
            self.distance_km,
            payment_method,
        )
    }
}

fn missing(field: &str) -> ShiptrackError {
    log::error!("Cannot build shipment: {} is required", field);
    ShiptrackError::new(
        &format!("Cannot build shipment: {} is required", field),
        ErrorKind::InvalidOperation,
    )
}

impl Shipment {
    /// Starts a [`ShipmentBuilder`].
    pub fn builder() -> ShipmentBuilder {
        ShipmentBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_build_with_all_fields() {
        let when = Utc::now();
        let shipment = Shipment::builder()
            .id(2)
            .sender("Dharma")
            .recipient("Muthu")
            .status(DeliveryStatus::Delivered)
            .product_name("Hair Oil")
            .delivery_time(when)
            .distance_km(20.0)
            .payment_method(PaymentMethod::Online)
            .build()
            .unwrap();

        assert_eq!(shipment.id(), 2);
        assert_eq!(shipment.sender(), "Dharma");
        assert!(!shipment.priority());
        assert_eq!(shipment.delivery_time(), when);
    }

    #[test]
    fn test_build_estimates_delivery_time_when_absent() {
        let before = Utc::now();
        let shipment = Shipment::builder()
            .id(3)
            .sender("Raghaven")
            .recipient("xxxxx")
            .product_name("Makeup-Kit")
            .distance_km(15.0)
            .build()
            .unwrap();
        let after = Utc::now();

        // non-priority, long haul: five days out
        assert!(shipment.delivery_time() >= before + Duration::days(5));
        assert!(shipment.delivery_time() <= after + Duration::days(5));
    }

    #[test]
    fn test_build_requires_id() {
        let err = Shipment::builder()
            .sender("Ashok")
            .recipient("Aswini")
            .product_name("Shampoo")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
        assert!(err.message().contains("id"));
    }

    #[test]
    fn test_build_requires_sender() {
        let err = Shipment::builder()
            .id(1)
            .recipient("Aswini")
            .product_name("Shampoo")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_build_rejects_bad_distance() {
        let err = Shipment::builder()
            .id(1)
            .sender("Ashok")
            .recipient("Aswini")
            .product_name("Shampoo")
            .distance_km(-1.0)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidDataType);
    }

    #[test]
    fn test_defaults() {
        let shipment = Shipment::builder()
            .id(7)
            .sender("Ashok")
            .recipient("Aswini")
            .product_name("Shampoo")
            .build()
            .unwrap();
        assert_eq!(shipment.status(), &DeliveryStatus::Pending);
        assert_eq!(shipment.payment_method(), &PaymentMethod::CashOnDelivery);
        assert_eq!(shipment.distance_km(), 0.0);
    }
}
