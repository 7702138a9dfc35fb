//! Form validation for sign-up, login, and habit names.

use std::fmt;

pub const USERNAME_MAX_LEN: usize = 10;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const HABIT_NAME_MAX_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    UsernameEmpty,
    UsernameTooLong,
    UsernameInvalidChars,
    PasswordEmpty,
    PasswordTooShort,
    PasswordInvalidChars,
    ConfirmationEmpty,
    PasswordMismatch,
    HabitNameBlank,
    HabitNameTooLong,
    HabitNameInvalidChars,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationError::UsernameEmpty => "Username is required",
            ValidationError::UsernameTooLong => "Username must be at most 10 characters",
            ValidationError::UsernameInvalidChars => {
                "Username may only contain letters, digits, '_' and '-'"
            }
            ValidationError::PasswordEmpty => "Password is required",
            ValidationError::PasswordTooShort => "Password must be at least 8 characters",
            ValidationError::PasswordInvalidChars => {
                "Password may only contain printable ASCII characters without spaces"
            }
            ValidationError::ConfirmationEmpty => "Please confirm the password",
            ValidationError::PasswordMismatch => "Passwords do not match",
            ValidationError::HabitNameBlank => "Habit name is required",
            ValidationError::HabitNameTooLong => "Habit name must be at most 10 characters",
            ValidationError::HabitNameInvalidChars => "Habit name contains invalid characters",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ValidationError {}

/// # Errors
/// Returns the first rule the username breaks.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(ValidationError::UsernameTooLong);
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::UsernameInvalidChars);
    }
    Ok(())
}

/// # Errors
/// Returns the first rule the password pair breaks.
pub fn validate_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordEmpty);
    }
    if !password.chars().all(|c| c.is_ascii_graphic()) {
        return Err(ValidationError::PasswordInvalidChars);
    }
    if password.len() < PASSWORD_MIN_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if confirmation.is_empty() {
        return Err(ValidationError::ConfirmationEmpty);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Validates a habit name and returns it trimmed.
///
/// # Errors
/// Returns the first rule the name breaks.
pub fn validate_habit_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::HabitNameBlank);
    }
    if trimmed.chars().count() > HABIT_NAME_MAX_LEN {
        return Err(ValidationError::HabitNameTooLong);
    }
    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::HabitNameInvalidChars);
    }
    Ok(trimmed)
}

/// Sign-up form state. Validation is recomputed on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpForm {
    username: String,
    password: String,
    confirmation: String,
    username_check: Option<ValidationError>,
    password_check: Option<ValidationError>,
    pub submitting: bool,
}

impl Default for SignUpForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SignUpForm {
    pub fn new() -> Self {
        let mut form = Self {
            username: String::new(),
            password: String::new(),
            confirmation: String::new(),
            username_check: None,
            password_check: None,
            submitting: false,
        };
        form.revalidate();
        form
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn confirmation(&self) -> &str {
        &self.confirmation
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
        self.revalidate();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.revalidate();
    }

    pub fn set_confirmation(&mut self, value: impl Into<String>) {
        self.confirmation = value.into();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.username_check = validate_username(&self.username).err();
        self.password_check = validate_password(&self.password, &self.confirmation).err();
    }

    pub fn username_error(&self) -> Option<ValidationError> {
        self.username_check
    }

    pub fn password_error(&self) -> Option<ValidationError> {
        self.password_check
    }

    pub fn can_submit(&self) -> bool {
        self.username_check.is_none() && self.password_check.is_none() && !self.submitting
    }
}

/// Login form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub submitting: bool,
}

impl LoginForm {
    pub fn can_submit(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty() && !self.submitting
    }
}
