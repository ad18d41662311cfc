pub mod auth;
pub mod billing;
pub mod case_history;
pub mod dashboard;
pub mod enums;
pub mod followup;
pub mod inventory;
pub mod page;
pub mod patient;
pub mod referral;
pub mod trial;
pub mod visit;

pub use auth::*;
pub use billing::*;
pub use case_history::*;
pub use dashboard::*;
pub use enums::*;
pub use followup::*;
pub use inventory::*;
pub use page::*;
pub use patient::*;
pub use referral::*;
pub use trial::*;
pub use visit::*;
