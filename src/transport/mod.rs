//! Transport layer: the HTTP client and response normalization.
//!
//! This module owns everything that touches the wire. The orchestrator never
//! calls it directly; requests travel through the worker message protocol so
//! transport latency cannot block state reads.
//!
//! # Organization
//!
//! - [`client`]: The [`SearchBackend`] seam and its blocking HTTP implementation
//! - [`normalize`]: Pure conversion of raw payloads into canonical result records

pub mod client;
pub mod normalize;

pub use client::{HttpBackend, SearchBackend};
pub use normalize::normalize;
