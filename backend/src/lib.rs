//! Notes backend: personal notes behind session login.
//!
//! Layout follows ports and adapters: `domain` holds the rules and the port
//! traits, `inbound` the HTTP handlers, `outbound` the storage adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
