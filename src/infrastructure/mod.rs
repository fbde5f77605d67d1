//! Infrastructure: configuration and wiring.
//!
//! - `config`: TOML configuration, secrets from the environment, logging setup
//! - `factory`: builds the provider, alert registry and scanner from a [`config::settings::Config`]

pub mod config;
pub mod factory;
