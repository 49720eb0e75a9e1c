pub mod activity;
pub mod admin;
pub mod check_in;
pub mod common;
pub mod conversation;
pub mod credit;
pub mod dashboard;
pub mod guide;
pub mod payout;
pub mod profile;
pub mod referral;
pub mod venue;

pub use activity::*;
pub use admin::*;
pub use check_in::*;
pub use common::*;
pub use conversation::*;
pub use credit::*;
pub use dashboard::*;
pub use guide::*;
pub use payout::*;
pub use profile::*;
pub use referral::*;
pub use venue::*;
