//! Domain aggregates exposed by the visit lifecycle service layer.

pub mod checklist;
pub mod competitor_product;
pub mod directory;
pub mod order;
pub mod recovery;
pub mod types;
pub mod visit;
