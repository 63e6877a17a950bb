use crate::models::Order;

/// The multi-party packing gate.
///
/// An order may advance iff it has at least one item and every item is
/// either packed by its seller or fulfilled directly by the platform
/// (no owning site, or carrying the platform's own brand).
///
/// Pure and side-effect free. Callers must re-evaluate it at the moment of
/// each transition rather than caching the result, because sellers flip
/// packing flags out of band from the transition request.
pub fn ready_to_advance(order: &Order, platform_brand: &str) -> bool {
    if order.items.is_empty() {
        // Defensive default: an empty order is never ready.
        return false;
    }
    order
        .items
        .iter()
        .all(|item| item.packed || item.site_id.is_none() || item.brand_name == platform_brand)
}
