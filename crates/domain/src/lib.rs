//! # karmandia-domain
//!
//! Pure domain model for the karmandia admin dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the two backend **records**: experiences and planning contacts
//! - Define the collection **envelope** and the generic [`resource::Resource`]
//!   description shared by both record types (paths, cache keys, labels)
//! - Validate **experience drafts** before anything leaves the process
//! - Render stored rich text as plain text (descriptions are never trusted HTML)
//! - Model the **dialogs** (delete confirmation, logout confirmation) as tagged
//!   state machines, and the side **navigation** with its active-route rule
//! - Carry bearer **credentials** explicitly instead of reading ambient state
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod contact;
pub mod dialog;
pub mod experience;
pub mod navigation;
pub mod notice;
pub mod resource;
pub mod rich_text;
pub mod session;
pub mod validation;
