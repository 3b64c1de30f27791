pub mod cleanup;
pub mod middleware;
pub mod password;
pub mod session;
pub mod users;

pub use cleanup::run_cleanup_worker;
pub use middleware::{get_client_ip, session_cookie, CurrentSession, RequireLogin};
pub use password::{hash_password, verify_password};
pub use session::{
    generate_session_token, generate_state_token, LoginOutcome, Session, SessionStore,
    SESSION_COOKIE,
};
pub use users::UserDirectory;
