use shiptrack::errors::ShiptrackResult;
use shiptrack::shipment::{DeliveryStatus, PaymentMethod, Shipment};
use shiptrack::store::ShipmentStore;

/// The three shipments every scenario starts from.
pub fn seed_shipments() -> ShiptrackResult<Vec<Shipment>> {
    Ok(vec![
        Shipment::builder()
            .id(1)
            .sender("Ashok")
            .recipient("Aswini")
            .status(DeliveryStatus::InTransit)
            .priority(true)
            .product_name("Shampoo")
            .distance_km(10.0)
            .payment_method(PaymentMethod::CreditCard)
            .build()?,
        Shipment::builder()
            .id(2)
            .sender("Dharma")
            .recipient("Muthu")
            .status(DeliveryStatus::Delivered)
            .product_name("Hair Oil")
            .distance_km(20.0)
            .payment_method(PaymentMethod::Online)
            .build()?,
        Shipment::builder()
            .id(3)
            .sender("Raghaven")
            .recipient("xxxxx")
            .status(DeliveryStatus::Pending)
            .product_name("Makeup-Kit")
            .distance_km(15.0)
            .payment_method(PaymentMethod::CashOnDelivery)
            .build()?,
    ])
}

/// A store pre-loaded with [`seed_shipments`].
pub fn seeded_store() -> ShiptrackResult<ShipmentStore> {
    ShipmentStore::builder().shipments(seed_shipments()?).build()
}
