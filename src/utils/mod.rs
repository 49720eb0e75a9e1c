pub mod password;
pub mod segment;
pub mod session_token;

pub use password::verify_password;
pub use segment::{parse_segment_title, SEGMENT_FALLBACK};
pub use session_token::{SessionClaims, SessionTokenService, SESSION_COOKIE};
