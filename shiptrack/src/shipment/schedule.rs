use chrono::{DateTime, Duration, Utc};

use crate::shipment::DeliveryStatus;

/// Distance at or below which a shipment counts as short-haul.
pub const SHORT_HAUL_KM: f64 = 10.0;

/// Estimates the delivery time for a shipment being registered.
///
/// This is the caller-side business rule: the store never derives delivery
/// times itself, it stores whatever timestamp it is given. The rule:
///
/// - already `Delivered`: delivery time is `now`
/// - priority, distance <= 10 km: one day
/// - priority, distance > 10 km: two days
/// - non-priority, distance <= 10 km: three days
/// - non-priority, distance > 10 km: five days
pub fn estimate_delivery(
    status: &DeliveryStatus,
    priority: bool,
    distance_km: f64,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    if status.is_delivered() {
        return now;
    }

    let days = match (priority, distance_km <= SHORT_HAUL_KM) {
        (true, true) => 1,
        (true, false) => 2,
        (false, true) => 3,
        (false, false) => 5,
    };
    now + Duration::days(days)
}

/// [`estimate_delivery`] anchored at the current wall-clock time.
pub fn estimate_delivery_from_now(
    status: &DeliveryStatus,
    priority: bool,
    distance_km: f64,
) -> DateTime<Utc> {
    estimate_delivery(status, priority, distance_km, Utc::now())
}
