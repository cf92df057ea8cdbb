//! Transfer ledger service library.
//!
//! Records users and the bank transfers they make, classifies each transfer
//! as CC, TED or DOC, and serves the records over a REST API. The layout is
//! hexagonal: [`domain`] holds entities, ports and services, [`inbound`] the
//! HTTP adapter and [`outbound`] the record stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
