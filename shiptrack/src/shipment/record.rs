use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorKind, ShiptrackError, ShiptrackResult};

/// Unique shipment identifier.
///
/// Assigned by the caller, unique across a store for its whole lifetime and
/// immutable once a shipment is registered.
pub type ShipmentId = u64;

/// Delivery state of a shipment.
///
/// The three well-known states get their own variants; anything else entered
/// by a caller is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeliveryStatus {
    InTransit,
    Delivered,
    Pending,
    /// Free-form status outside the well-known set
    Other(String),
}

impl DeliveryStatus {
    /// Parses a status label, case-insensitively, into a well-known variant.
    ///
    /// Unknown labels are kept as [`DeliveryStatus::Other`] rather than
    /// rejected.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "in transit" | "in-transit" | "intransit" => DeliveryStatus::InTransit,
            "delivered" => DeliveryStatus::Delivered,
            "pending" => DeliveryStatus::Pending,
            _ => DeliveryStatus::Other(label.to_string()),
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered)
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryStatus::InTransit => write!(f, "In Transit"),
            DeliveryStatus::Delivered => write!(f, "Delivered"),
            DeliveryStatus::Pending => write!(f, "Pending"),
            DeliveryStatus::Other(label) => write!(f, "{}", label),
        }
    }
}

/// How a shipment is paid for.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaymentMethod {
    CreditCard,
    Online,
    CashOnDelivery,
    /// Free-form payment method outside the well-known set
    Other(String),
}

impl PaymentMethod {
    /// Parses a payment label, case-insensitively, into a well-known variant.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "credit card" | "credit-card" | "creditcard" => PaymentMethod::CreditCard,
            "online" | "online payment" => PaymentMethod::Online,
            "cash on delivery" | "cash-on-delivery" | "cod" => PaymentMethod::CashOnDelivery,
            _ => PaymentMethod::Other(label.to_string()),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::CreditCard => write!(f, "Credit Card"),
            PaymentMethod::Online => write!(f, "Online"),
            PaymentMethod::CashOnDelivery => write!(f, "Cash on Delivery"),
            PaymentMethod::Other(label) => write!(f, "{}", label),
        }
    }
}

/// One shipment's full attribute set.
///
/// # Purpose
/// `Shipment` is the value object a [`crate::store::ShipmentStore`] indexes.
/// The identifier, sender, recipient and priority flag are treated as
/// immutable once the shipment is registered; only the delivery status may be
/// mutated afterwards (through the store, so dependent indices stay in step).
///
/// # Construction
/// Either directly via [`Shipment::new`] with a precomputed delivery time, or
/// through [`crate::shipment::ShipmentBuilder`] which fills the delivery time
/// in from the standard estimation rule.
///
/// The delivery time is always computed by the caller's business rule (see
/// [`crate::shipment::estimate_delivery`]); the store itself never derives it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shipment {
    id: ShipmentId,
    sender: String,
    recipient: String,
    status: DeliveryStatus,
    priority: bool,
    product_name: String,
    delivery_time: DateTime<Utc>,
    distance_km: f64,
    payment_method: PaymentMethod,
}

impl Shipment {
    /// Creates a shipment with all fields populated.
    ///
    /// # Errors
    /// Returns [`ErrorKind::InvalidDataType`] if `distance_km` is negative or
    /// not a finite number.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ShipmentId,
        sender: &str,
        recipient: &str,
        status: DeliveryStatus,
        priority: bool,
        product_name: &str,
        delivery_time: DateTime<Utc>,
        distance_km: f64,
        payment_method: PaymentMethod,
    ) -> ShiptrackResult<Self> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(ShiptrackError::new(
                &format!("Distance must be a non-negative number, got {}", distance_km),
                ErrorKind::InvalidDataType,
            ));
        }

        Ok(Shipment {
            id,
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            status,
            priority,
            product_name: product_name.to_string(),
            delivery_time,
            distance_km,
            payment_method,
        })
    }

    pub fn id(&self) -> ShipmentId {
        self.id
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn status(&self) -> &DeliveryStatus {
        &self.status
    }

    /// Replaces the delivery status in place.
    ///
    /// On a registered shipment this must go through
    /// `ShipmentStore::update_status` so the urgency queue is re-ordered.
    pub fn set_status(&mut self, status: DeliveryStatus) {
        self.status = status;
    }

    /// Whether this shipment is urgent.
    pub fn priority(&self) -> bool {
        self.priority
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn delivery_time(&self) -> DateTime<Utc> {
        self.delivery_time
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn payment_method(&self) -> &PaymentMethod {
        &self.payment_method
    }

    /// Labeled field values in canonical order, for tabular rendering.
    ///
    /// The order is fixed: identifier, sender, recipient, status, priority,
    /// product name, delivery time, distance, payment method.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Sender", self.sender.clone()),
            ("Recipient", self.recipient.clone()),
            ("Delivery Status", self.status.to_string()),
            ("Priority", self.priority.to_string()),
            ("Product Name", self.product_name.clone()),
            ("Delivery Time", self.delivery_time.to_rfc3339()),
            ("Distance", format!("{} km", self.distance_km)),
            ("Payment Method", self.payment_method.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Shipment {
        Shipment::new(
            1,
            "Ashok",
            "Aswini",
            DeliveryStatus::InTransit,
            true,
            "Shampoo",
            Utc.with_ymd_and_hms(2023, 6, 18, 18, 26, 37).unwrap(),
            10.0,
            PaymentMethod::CreditCard,
        )
        .unwrap()
    }

    #[test]
    fn test_new_populates_all_fields() {
        let shipment = sample();
        assert_eq!(shipment.id(), 1);
        assert_eq!(shipment.sender(), "Ashok");
        assert_eq!(shipment.recipient(), "Aswini");
        assert_eq!(shipment.status(), &DeliveryStatus::InTransit);
        assert!(shipment.priority());
        assert_eq!(shipment.product_name(), "Shampoo");
        assert_eq!(shipment.distance_km(), 10.0);
        assert_eq!(shipment.payment_method(), &PaymentMethod::CreditCard);
    }

    #[test]
    fn test_new_rejects_negative_distance() {
        let result = Shipment::new(
            1,
            "Ashok",
            "Aswini",
            DeliveryStatus::Pending,
            false,
            "Shampoo",
            Utc::now(),
            -3.0,
            PaymentMethod::Online,
        );
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidDataType);
    }

    #[test]
    fn test_new_rejects_non_finite_distance() {
        let result = Shipment::new(
            1,
            "Ashok",
            "Aswini",
            DeliveryStatus::Pending,
            false,
            "Shampoo",
            Utc::now(),
            f64::NAN,
            PaymentMethod::Online,
        );
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidDataType);
    }

    #[test]
    fn test_set_status() {
        let mut shipment = sample();
        shipment.set_status(DeliveryStatus::Delivered);
        assert!(shipment.status().is_delivered());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(DeliveryStatus::parse("In Transit"), DeliveryStatus::InTransit);
        assert_eq!(DeliveryStatus::parse("in-transit"), DeliveryStatus::InTransit);
        assert_eq!(DeliveryStatus::parse("DELIVERED"), DeliveryStatus::Delivered);
        assert_eq!(DeliveryStatus::parse("pending"), DeliveryStatus::Pending);
        assert_eq!(
            DeliveryStatus::parse("Held at customs"),
            DeliveryStatus::Other("Held at customs".to_string())
        );
    }

    #[test]
    fn test_payment_parse() {
        assert_eq!(PaymentMethod::parse("Credit Card"), PaymentMethod::CreditCard);
        assert_eq!(PaymentMethod::parse("online"), PaymentMethod::Online);
        assert_eq!(PaymentMethod::parse("COD"), PaymentMethod::CashOnDelivery);
        assert_eq!(
            PaymentMethod::parse("Barter"),
            PaymentMethod::Other("Barter".to_string())
        );
    }

    #[test]
    fn test_rows_order_and_labels() {
        let rows = sample().rows();
        let labels: Vec<&str> = rows.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec![
                "ID",
                "Sender",
                "Recipient",
                "Delivery Status",
                "Priority",
                "Product Name",
                "Delivery Time",
                "Distance",
                "Payment Method",
            ]
        );
        assert_eq!(rows[0].1, "1");
        assert_eq!(rows[3].1, "In Transit");
        assert_eq!(rows[7].1, "10 km");
    }
}
