//! Adapters connecting the application to the outside world.
//!
//! - `inbound`: command-line entry points
//! - `outbound`: odds provider and alert channels

pub mod inbound;
pub mod outbound;
