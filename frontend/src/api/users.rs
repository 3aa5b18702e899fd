use learnify_shared::{ApiPaths, RegisterRequest, UpdateProfileRequest, UserProfile};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn register_user(&self, data: &RegisterRequest) -> ApiResult<UserProfile> {
        self.post(ApiPaths::USERS, data).await
    }

    pub async fn get_all_users(&self) -> ApiResult<Vec<UserProfile>> {
        self.get(ApiPaths::USERS).await
    }

    pub async fn get_user(&self, id: &str) -> ApiResult<UserProfile> {
        self.get(&ApiPaths::user(id)).await
    }

    pub async fn update_user(&self, id: &str, data: &UpdateProfileRequest) -> ApiResult<UserProfile> {
        self.put(&ApiPaths::user(id), data).await
    }

    pub async fn delete_user(&self, id: &str) -> ApiResult<()> {
        self.delete(&ApiPaths::user(id)).await
    }

    pub async fn get_me(&self) -> ApiResult<UserProfile> {
        self.get(ApiPaths::ME).await
    }

    pub async fn update_me(&self, data: &UpdateProfileRequest) -> ApiResult<UserProfile> {
        self.put(ApiPaths::ME, data).await
    }

    pub async fn delete_me(&self) -> ApiResult<()> {
        self.delete(ApiPaths::ME).await
    }
}
