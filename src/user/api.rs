use serde::Deserialize;

use crate::api::Client;

use super::model::{Role, User};

#[derive(Clone)]
pub struct UserApi {
    client: Client,
}

impl UserApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn find_all(&self, role: Option<Role>) -> super::Result<Vec<User>> {
        #[derive(Deserialize)]
        struct Payload {
            users: Vec<User>,
        }

        let mut query = Vec::new();
        if let Some(role) = role {
            query.push(("role", role.as_str().to_owned()));
        }

        let payload: Payload = self.client.get("/api/users", &query).await?;
        Ok(payload.users)
    }
}
