//! Ancillary-data needle encoding
//!
//! The oracle embeds `market_id: <id>` in each request's ancillary data as
//! UTF-8 bytes. Matching requests for a market therefore means substring
//! matching on the lowercase hex rendering of that phrase, byte for byte.

/// Derive the hex search key for a market id
pub fn encode_needle(market_id: &str) -> String {
    hex::encode(format!("market_id: {market_id}"))
}
