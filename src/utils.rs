//! Identifier helpers
use super::error::OrderIdError;
use super::order::TimeStamp;
use bech32::Bech32m;
use chrono::Utc;
use uuid7::uuid7;

pub const ORDER_HRP: &str = "order_";

// order ids carry the checkout time in their leading 8 bytes; the tail is the
// random half of a fresh uuid7 so two checkouts in the same millisecond differ
pub fn new_order_id(placed_at: &TimeStamp<Utc>) -> Result<String, OrderIdError> {
    let hrp = bech32::Hrp::parse(ORDER_HRP)?;

    let mut payload = [0u8; 16];
    let (millis, random) = payload.split_at_mut(8);
    millis.copy_from_slice(&placed_at.timestamp_millis().to_be_bytes());
    random.copy_from_slice(&uuid7().as_bytes()[8..]);

    Ok(bech32::encode::<Bech32m>(hrp, &payload)?)
}

/// Recovers the checkout time (unix millis) embedded in an order id.
pub fn order_id_millis(id: &str) -> Option<i64> {
    let (hrp, data) = bech32::decode(id).ok()?;
    if hrp.as_str() != ORDER_HRP {
        return None;
    }
    let head: [u8; 8] = data.get(..8)?.try_into().ok()?;
    Some(i64::from_be_bytes(head))
}
