//! Authentication: identities, the session store, the backend it signs
//! users in through, and the HTTP handlers around them.

pub mod backend;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod session;
pub mod user;

pub use backend::{AuthBackend, SimulatedBackend};
pub use error::AuthError;
pub use handlers::{login_page, login_submit, logout};
pub use middleware::{AuthContext, route_guard};
pub use session::{SessionState, SessionStore};
pub use user::{Role, UnknownRole, User};
