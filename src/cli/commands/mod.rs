//! Command implementations

pub mod change_order;
pub mod completions;
pub mod contract;
pub mod init;
pub mod invoice;
pub mod settings;
pub mod status;
pub mod subcontract;
