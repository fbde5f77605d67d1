//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod alert;
pub mod provider;
