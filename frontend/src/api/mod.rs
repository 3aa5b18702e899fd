//! 资源 API
//!
//! 每个资源一个模块，以 `impl ApiClient` 的形式扩展方法，
//! 只负责把"动词 + 路径"映射到客户端；认证与重试由 `ApiClient` 统一处理。

mod answers;
mod auth;
mod courses;
mod enrollments;
mod lessons;
mod materials;
mod progressions;
mod questions;
mod quizzes;
mod submissions;
mod users;

#[cfg(test)]
mod tests;
