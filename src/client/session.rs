use tracing::info;

/// Locale used until the user picks another one
pub const DEFAULT_LOCALE: &str = "en";

/// The signed-in user and their display language.
///
/// Created at sign-in and consumed by [`SessionContext::logout`], so no
/// operation can run on behalf of a user after they have logged out.
#[derive(Debug, PartialEq, Eq)]
pub struct SessionContext {
    user_id: String,
    locale: String,
}

impl SessionContext {
    pub fn sign_in(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        info!("Session started for user {}", user_id);
        Self {
            user_id,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn change_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn logout(self) {
        info!("Session ended for user {}", self.user_id);
    }
}
