//! The Odds API (v4) provider adapter.

pub mod client;
pub mod convert;
pub mod dto;

pub use client::OddsApiClient;
