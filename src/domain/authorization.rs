/// User context extracted from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub username: String,
    pub is_admin: bool,
}

impl UserContext {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }

    /// Check if the user may perform administrative writes
    pub fn can_manage_listings(&self) -> bool {
        self.is_admin
    }
}

/// Authorization error types
#[derive(Debug, thiserror::Error)]
pub enum AuthorizationError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Admin privileges required")]
    AdminRequired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
