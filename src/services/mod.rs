pub mod activity_service;
pub mod admin_service;
pub mod check_in_service;
pub mod conversation_service;
pub mod credit_service;
pub mod dashboard_service;
pub mod guide_service;
pub mod payout_service;
pub mod profile_service;
pub mod referral_service;
pub mod session_service;
pub mod venue_service;

pub use activity_service::*;
pub use admin_service::*;
pub use check_in_service::*;
pub use conversation_service::*;
pub use credit_service::*;
pub use dashboard_service::*;
pub use guide_service::*;
pub use payout_service::*;
pub use profile_service::*;
pub use referral_service::*;
pub use session_service::*;
pub use venue_service::*;
