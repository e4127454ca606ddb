//! # karmandia-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-side-rendered admin dashboard**: the experience list,
//!   the create form and the planning contact list
//! - Map HTTP requests into application service calls (driving adapter)
//! - Carry the bearer token in a session cookie
//!
//! ## No-JS dashboard approach
//! - Every page is rendered server-side as complete HTML (askama templates).
//! - Dialogs are part of the page state in the URL (`?delete=<id>`,
//!   `?logout=open`); Cancel is a plain link back.
//! - Mutations are `<form>` POSTs that redirect (PRG pattern), carrying the
//!   resulting notice in the query string.
//!
//! ## Dependency rule
//! Depends on `karmandia-app` (for port traits and services) and
//! `karmandia-domain`. Never leaks axum types into the domain.

pub mod dashboard;
pub mod error;
pub mod flash;
pub mod router;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
