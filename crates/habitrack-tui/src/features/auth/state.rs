//! Login / sign-up screen state.

pub use habitrack_core::guard::SESSION_EXPIRED_MESSAGE;
use habitrack_core::validation::{LoginForm, SignUpForm};

pub const SIGNUP_SUCCESS_MESSAGE: &str = "Account created. Please log in.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Username,
    Password,
    Confirmation,
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub mode: AuthMode,
    pub login: LoginForm,
    pub signup: SignUpForm,
    pub focus: Field,
    /// Server or session message shown under the form.
    pub error: Option<String>,
    /// Success notice shown above the login form after sign-up.
    pub notice: Option<String>,
}

impl AuthState {
    /// Fields of the active form, in focus order.
    pub fn fields(&self) -> &'static [Field] {
        match self.mode {
            AuthMode::Login => &[Field::Username, Field::Password],
            AuthMode::SignUp => &[Field::Username, Field::Password, Field::Confirmation],
        }
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + fields.len() - 1) % fields.len()];
    }

    pub fn is_submitting(&self) -> bool {
        match self.mode {
            AuthMode::Login => self.login.submitting,
            AuthMode::SignUp => self.signup.submitting,
        }
    }

    pub fn can_submit(&self) -> bool {
        match self.mode {
            AuthMode::Login => self.login.can_submit(),
            AuthMode::SignUp => self.signup.can_submit(),
        }
    }

    /// Toggles between login and sign-up, keeping the typed username.
    pub fn switch_mode(&mut self) {
        match self.mode {
            AuthMode::Login => {
                self.mode = AuthMode::SignUp;
                self.signup.set_username(self.login.username.clone());
                self.notice = None;
            }
            AuthMode::SignUp => {
                self.mode = AuthMode::Login;
                self.login.username = self.signup.username().to_string();
            }
        }
        self.error = None;
        self.focus = Field::Username;
    }

    /// Forgets typed passwords and any in-flight flags.
    pub fn clear_secrets(&mut self) {
        self.login.password.clear();
        self.login.submitting = false;
        self.signup.set_password(String::new());
        self.signup.set_confirmation(String::new());
        self.signup.submitting = false;
    }

    pub fn show_expired(&mut self) {
        self.mode = AuthMode::Login;
        self.focus = Field::Username;
        self.notice = None;
        self.error = Some(SESSION_EXPIRED_MESSAGE.to_string());
    }

    /// The focused field's current text.
    pub fn focused_value(&self) -> String {
        self.value(self.focus)
    }

    pub fn value(&self, field: Field) -> String {
        match (self.mode, field) {
            (AuthMode::Login, Field::Username) => self.login.username.clone(),
            (AuthMode::Login, _) => self.login.password.clone(),
            (AuthMode::SignUp, Field::Username) => self.signup.username().to_string(),
            (AuthMode::SignUp, Field::Password) => self.signup.password().to_string(),
            (AuthMode::SignUp, Field::Confirmation) => self.signup.confirmation().to_string(),
        }
    }

    /// Replaces the focused field's text; sign-up validation reruns.
    pub fn set_focused_value(&mut self, value: String) {
        match (self.mode, self.focus) {
            (AuthMode::Login, Field::Username) => self.login.username = value,
            (AuthMode::Login, _) => self.login.password = value,
            (AuthMode::SignUp, Field::Username) => self.signup.set_username(value),
            (AuthMode::SignUp, Field::Password) => self.signup.set_password(value),
            (AuthMode::SignUp, Field::Confirmation) => self.signup.set_confirmation(value),
        }
    }
}
