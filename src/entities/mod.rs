//! Record type definitions
//!
//! gcPanel manages the following record types:
//!
//! **Contract administration (file-backed):**
//! - [`Contract`] - Prime/owner contracts with derived current value
//! - [`ChangeOrder`] - Contract amendments adjusting scope, price, or schedule
//! - [`Subcontract`] - Trade contractor agreements
//! - [`Invoice`] - Progress billing with retainage
//!
//! **Settings (session-scoped, in-memory):**
//! - [`UserPreference`] - Per-user interface and notification preferences
//! - [`SystemConfiguration`] - System-wide configuration settings
//! - [`IntegrationSetting`] - Third-party integration connection records

pub mod change_order;
pub mod configuration;
pub mod contract;
pub mod integration;
pub mod invoice;
pub mod preference;
pub mod subcontract;

pub use change_order::ChangeOrder;
pub use configuration::SystemConfiguration;
pub use contract::Contract;
pub use integration::IntegrationSetting;
pub use invoice::Invoice;
pub use preference::UserPreference;
pub use subcontract::Subcontract;
