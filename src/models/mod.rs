pub mod auth;
pub mod checklist;
pub mod competitor_product;
pub mod config;
pub mod directory;
pub mod order;
pub mod recovery;
pub mod visit;
