//! Request and response payloads for the JSON API.
//!
//! Requests validate shape here and convert into domain constructors, which
//! enforce the business rules; responses flatten domain types into the wire
//! representation.

pub mod checklist;
pub mod competitor_product;
pub mod order;
pub mod recovery;
pub mod visit;
