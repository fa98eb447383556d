//! gcPanel: Highland Tower construction dashboard
//!
//! Record store for construction contract administration - contracts, change
//! orders, subcontracts, and invoices as plain JSON files - plus
//! session-scoped application settings.

pub mod cli;
pub mod core;
pub mod entities;
pub mod store;
