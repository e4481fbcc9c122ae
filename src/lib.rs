//! Sales-tracking backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, services,
//! and ports; `inbound` adapts HTTP requests onto the driving ports;
//! `outbound` implements the driven ports.

pub mod doc;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by documentation tooling.
pub use doc::ApiDoc;
