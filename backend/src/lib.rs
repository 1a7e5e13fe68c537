//! Microblog backend library: domain model, adapters and HTTP surface.
//!
//! The crate follows a hexagonal layout. [`domain`] holds entities, services
//! and ports; [`outbound`] implements the driven ports against PostgreSQL and
//! Argon2; [`inbound`] exposes the driving ports over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
