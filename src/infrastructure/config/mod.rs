//! Infrastructure configuration modules.

pub mod logging;
pub mod pricing;
pub mod provider;
pub mod service;
pub mod settings;
