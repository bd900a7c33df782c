// Module layout (Clean Architecture style)
// - bootstrap: configuration and shared application context
// - infrastructure: Postgres / in-memory stores and token signing
// - presentation: HTTP handlers, authorization middleware and routing
// - application: ports and use cases
// - domain: accounts and partial updates

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
