//! Component factories.

pub mod alert;
pub mod scanner;

pub use alert::build_alert_registry;
pub use scanner::{build_provider, build_scanner};
