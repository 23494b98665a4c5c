//! Client-side login gate.
//!
//! Only lengths are checked locally. A successful login does not attach any
//! credential to later requests.

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 6;

pub const USERNAME_TOO_SHORT: &str = "Username must be at least 3 characters.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) remember_me: bool,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().chars().count() < MIN_USERNAME_CHARS {
            return Err(USERNAME_TOO_SHORT);
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(PASSWORD_TOO_SHORT);
        }
        Ok(())
    }

    /// Starts a submission. Returns the credentials to post, or records the
    /// validation error and returns `None`.
    pub(crate) fn begin_submit(&mut self) -> Option<(String, String)> {
        if self.loading {
            return None;
        }
        self.error = None;
        match self.validate() {
            Ok(()) => {
                self.loading = true;
                Some((self.username.clone(), self.password.clone()))
            }
            Err(message) => {
                self.error = Some(message.to_string());
                None
            }
        }
    }

    pub(crate) fn succeed(&mut self) {
        self.loading = false;
        self.error = None;
        self.password.clear();
    }

    pub(crate) fn fail(&mut self) {
        self.loading = false;
        self.error = Some(INVALID_CREDENTIALS.to_string());
    }

    pub(crate) fn restore(&mut self, username: String) {
        self.username = username;
        self.remember_me = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn {
        username: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: password.to_string(),
            ..LoginForm::default()
        }
    }

    #[test]
    fn username_is_trimmed_before_length_check() {
        assert_eq!(form("  ab  ", "secret1").validate(), Err(USERNAME_TOO_SHORT));
        assert_eq!(form(" abc ", "secret1").validate(), Ok(()));
    }

    #[test]
    fn username_checked_before_password() {
        assert_eq!(form("ab", "x").validate(), Err(USERNAME_TOO_SHORT));
        assert_eq!(form("alice", "12345").validate(), Err(PASSWORD_TOO_SHORT));
    }

    #[test]
    fn password_is_not_trimmed() {
        assert_eq!(form("alice", "      ").validate(), Ok(()));
    }

    #[test]
    fn submit_blocked_while_loading() {
        let mut login = form("alice", "secret1");
        assert!(login.begin_submit().is_some());
        assert!(login.begin_submit().is_none());
    }
}
