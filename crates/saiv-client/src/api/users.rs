//! `/users` endpoint.

use saiv_core::AppResult;
use saiv_core::types::ListResponse;
use saiv_entity::user::{User, UserRole};

use crate::session::ClientSession;

impl ClientSession {
    /// `GET /users/?role=`
    pub async fn list_users(&self, role: Option<UserRole>) -> AppResult<Vec<User>> {
        let query: Vec<(&str, String)> = role
            .map(|r| vec![("role", r.as_str().to_string())])
            .unwrap_or_default();
        let list: ListResponse<User> = self.get("/users/", &query).await?;
        Ok(list.into_items())
    }
}
