//! Backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds types, services, and
//! ports; `inbound` adapts HTTP requests onto the driving ports; `outbound`
//! implements the driven ports over PostgreSQL, memory, and the generator
//! API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
