//! # karmandia-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `BackendApi` — list, create and delete records on the remote REST API
//!   - `SessionProvider` — end the current session
//! - Provide the **query cache**: a keyed store of fetched collections with
//!   explicit invalidation (last write wins per key)
//! - Define **driving/inbound** use-cases:
//!   - `ResourceService` — cached collection queries, deletes, creates
//!   - `DeleteFlow` — the delete confirmation state machine wired to the backend
//!   - `CreateExperienceFlow` — validate, submit, report
//!   - `SessionService` — logout confirmation and sign-out
//!   - `ListView` — loading / error / table projection of a query
//! - Hold uploaded images for preview between form submissions (`PreviewStore`)
//!
//! ## Dependency rule
//! Depends on `karmandia-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod preview_store;
pub mod query_cache;
pub mod services;
