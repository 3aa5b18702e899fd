//! 客户端配置
//!
//! 默认值可在构建时通过环境变量覆盖（`option_env!`），
//! 例如 `LEARNIFY_API_BASE_URL=https://api.learnify.dev trunk build --release`。

use learnify_shared::ApiPaths;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TOKEN_KEY: &str = "accessToken";

/// 客户端运行配置
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// 后端根地址（已去除末尾 `/`）
    pub base_url: String,
    /// access token 在本地存储中的键名
    pub token_storage_key: String,
    /// 刷新 token 的接口路径，它自身的 401 永不重试
    pub refresh_path: String,
    /// 登录接口路径，它的 401 表示凭据错误，不触发刷新
    pub login_path: String,
    /// 是否随请求携带 cookie（refresh token 保存在 http-only cookie 中）
    pub with_credentials: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token_storage_key: DEFAULT_TOKEN_KEY.to_string(),
            refresh_path: ApiPaths::AUTH_REFRESH.to_string(),
            login_path: ApiPaths::AUTH_LOGIN.to_string(),
            with_credentials: true,
        }
    }

    /// 读取构建时变量，读不到就用默认值
    pub fn from_build_env() -> Self {
        let mut config = Self::new(option_env!("LEARNIFY_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL));
        if let Some(key) = option_env!("LEARNIFY_TOKEN_KEY") {
            config.token_storage_key = key.to_string();
        }
        config
    }

    /// 将相对路径拼接为完整 URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_and_joins_paths() {
        let config = ClientConfig::new("http://api.test///");
        assert_eq!(config.base_url, "http://api.test");
        assert_eq!(config.url("/courses"), "http://api.test/courses");
        assert_eq!(config.url("courses/1"), "http://api.test/courses/1");
    }

    #[test]
    fn defaults_point_at_auth_endpoints() {
        let config = ClientConfig::new("http://api.test");
        assert_eq!(config.refresh_path, "/auth/refresh");
        assert_eq!(config.login_path, "/auth/login");
        assert_eq!(config.token_storage_key, "accessToken");
        assert!(config.with_credentials);
    }
}
