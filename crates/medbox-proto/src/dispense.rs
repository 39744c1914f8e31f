//! Parsing of the inbound `dispense` request.

use serde::Deserialize;

/// Defensive upper bound on a single request's `amount`, so a malformed or
/// malicious payload cannot pin the actuator into an unbounded run. Not part
/// of the wire schema; enforced here by clamping.
pub const MAX_DISPENSE_AMOUNT: u32 = 100;

#[derive(Debug, Deserialize)]
struct DispenseRequest {
    amounts: Vec<AmountEntry>,
}

#[derive(Debug, Deserialize)]
struct AmountEntry {
    #[serde(rename = "magazineId")]
    magazine_id: i64,
    amount: i64,
    // Extra fields such as `magazineName` are intentionally ignored: serde
    // drops unknown fields by default as long as we don't opt into
    // `deny_unknown_fields`.
}

/// A parse failure for an inbound `dispense` payload. Per spec §7, the only
/// action taken on this is to drop the payload and log it — there is no
/// negative acknowledgement on the bus.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("payload is not valid UTF-8")]
    NotUtf8,
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Parses a `dispense` payload into `(magazine_id, amount)` pairs, ready for
/// `Queue::enqueue`.
///
/// Unknown magazine ids (anything other than 1 or 2) are silently dropped,
/// per spec §6 — this is not a parse error, just an entry the caller won't
/// recognize. `amount` is clamped to `MAX_DISPENSE_AMOUNT` and a negative
/// amount is dropped entirely, since the schema requires `amount >= 0`.
pub fn parse_dispense(payload: &[u8]) -> Result<Vec<(u8, u32)>, ParseError> {
    let text = std::str::from_utf8(payload).map_err(|_| ParseError::NotUtf8)?;
    let request: DispenseRequest = serde_json::from_str(text)?;

    let entries = request
        .amounts
        .into_iter()
        .filter_map(|entry| {
            let magazine_id = u8::try_from(entry.magazine_id).ok()?;
            if magazine_id != 1 && magazine_id != 2 {
                return None;
            }
            let amount = u32::try_from(entry.amount).ok()?;
            Some((magazine_id, amount.min(MAX_DISPENSE_AMOUNT)))
        })
        .collect();

    Ok(entries)
}
