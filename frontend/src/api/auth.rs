use learnify_shared::{ApiPaths, HttpMethod, LoginRequest, TokenResponse};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<TokenResponse> {
        self.post(ApiPaths::AUTH_LOGIN, credentials).await
    }

    /// 走拦截器的共享刷新入口，失败时 token 已被清除
    pub async fn refresh(&self) -> ApiResult<String> {
        self.refresh_access_token().await
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.call(HttpMethod::Post, ApiPaths::AUTH_LOGOUT, None).await
    }
}
