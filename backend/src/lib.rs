//! Job board backend library.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, the access
//! decision function and the services; `inbound` adapts HTTP requests onto
//! the driving ports; `outbound` implements the driven ports; `server` wires
//! adapters to services and serves the app.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
