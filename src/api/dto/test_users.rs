use serde::Serialize;

use crate::services::authz::PrincipalKey;

const INSTRUCTIONS: &str =
    "Use these credentials to test NTLM authentication. Format: domain\\username";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestUsersResponse {
    pub test_users: Vec<PrincipalKey>,
    pub instructions: &'static str,
}

impl TestUsersResponse {
    pub fn new(test_users: Vec<PrincipalKey>) -> Self {
        Self {
            test_users,
            instructions: INSTRUCTIONS,
        }
    }
}
