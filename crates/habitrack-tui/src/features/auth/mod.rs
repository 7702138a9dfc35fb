//! Auth feature slice: login and sign-up forms.

mod render;
mod state;
mod update;

pub use render::render_auth;
pub use state::{AuthMode, AuthState, Field, SESSION_EXPIRED_MESSAGE, SIGNUP_SUCCESS_MESSAGE};
pub use update::{handle_event, handle_key};
