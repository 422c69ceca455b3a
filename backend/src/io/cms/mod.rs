//! Upstream content-API integration: query grammar, response envelopes, and
//! the HTTP client tying them together.

pub mod client;
pub mod envelope;
pub mod query;
