use super::{data, API_PREFIX};
use crate::api::query::{encode_segment, Pageable, QueryString};
use crate::api::{ApiClient, ApiError};
use crate::models::{CreateUserRequest, Page, Role, UpdateUserRequest, User};

/// `/api/v1/users`
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn base() -> String {
        format!("{}/users", API_PREFIX)
    }

    pub async fn list(&self, pageable: &Pageable) -> Result<Page<User>, ApiError> {
        let path = format!("{}{}", Self::base(), pageable.query());
        data(self.client.get(&path).await?)
    }

    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        data(self.client.get(&format!("{}/{}", Self::base(), id)).await?)
    }

    pub async fn create(&self, request: &CreateUserRequest) -> Result<User, ApiError> {
        data(self.client.post(&Self::base(), request).await?)
    }

    pub async fn update(&self, id: i64, request: &UpdateUserRequest) -> Result<User, ApiError> {
        data(self.client.put(&format!("{}/{}", Self::base(), id), request).await?)
    }

    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        self.client.del(&format!("{}/{}", Self::base(), id)).await?;
        Ok(())
    }

    pub async fn search(&self, name: &str, pageable: &Pageable) -> Result<Page<User>, ApiError> {
        let query = QueryString::new().param("name", name).pageable(pageable);
        let path = format!("{}/search{}", Self::base(), query.render());
        data(self.client.get(&path).await?)
    }

    pub async fn by_role(&self, role: &Role, pageable: &Pageable) -> Result<Page<User>, ApiError> {
        let path = format!(
            "{}/role/{}{}",
            Self::base(),
            encode_segment(role.as_str()),
            pageable.query()
        );
        data(self.client.get(&path).await?)
    }

    pub async fn by_email(&self, email: &str) -> Result<User, ApiError> {
        let path = format!("{}/email/{}", Self::base(), encode_segment(email));
        data(self.client.get(&path).await?)
    }
}
