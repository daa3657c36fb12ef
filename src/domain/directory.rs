//! Read-only reference entities synchronized from the external ERP.
//!
//! Clients ("Tiers") and commercials are written by the sync jobs, which are
//! out of scope here; the core only consults them for FK validation and
//! report display.

use serde::Serialize;

/// A client of the sales force.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Tiers {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
}

/// A sales agent, identified by its reference code (Cref).
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Commercial {
    pub id: i32,
    pub cref: String,
    pub name: String,
    pub email: Option<String>,
}
