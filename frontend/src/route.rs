/// Views of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Transactions,
}

impl Route {
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Transactions)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign in",
            Route::Register => "Create account",
            Route::Dashboard => "Dashboard",
            Route::Transactions => "Transactions",
        }
    }

    /// View to render for this route. Protected views fall back to login without a session.
    pub fn resolve(self, authenticated: bool) -> Route {
        if self.requires_auth() && !authenticated {
            Route::Login
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_routes_need_session() {
        assert_eq!(Route::Dashboard.resolve(false), Route::Login);
        assert_eq!(Route::Transactions.resolve(false), Route::Login);
        assert_eq!(Route::Transactions.resolve(true), Route::Transactions);
        assert_eq!(Route::Register.resolve(false), Route::Register);
    }
}
