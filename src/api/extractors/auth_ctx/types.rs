/*
 * Responsibility
 * - The authorized identity handlers see on protected routes
 * - access middleware fills it from the matched registry entry; handlers only
 *   ever receive this type
 */

/// Identity that passed the authorization gate.
///
/// `username` / `domain` are the registry's declared spelling, not the
/// lowercased key that was matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub username: String,
    pub domain: String,
}

impl AuthCtx {
    pub fn new(username: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            domain: domain.into(),
        }
    }
}
