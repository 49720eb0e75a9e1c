pub mod admins;
pub mod app_guides;
pub mod auth_users;
pub mod check_ins;
pub mod connection_requests;
pub mod conversation_participants;
pub mod conversations;
pub mod credit_transactions;
pub mod payouts;
pub mod profiles;
pub mod referrals;
pub mod user_activities;
pub mod venues;

pub use admins as admin_entity;
pub use app_guides as app_guide_entity;
pub use auth_users as auth_user_entity;
pub use check_ins as check_in_entity;
pub use connection_requests as connection_request_entity;
pub use conversation_participants as conversation_participant_entity;
pub use conversations as conversation_entity;
pub use credit_transactions as credit_transaction_entity;
pub use payouts as payout_entity;
pub use profiles as profile_entity;
pub use referrals as referral_entity;
pub use user_activities as user_activity_entity;
pub use venues as venue_entity;
