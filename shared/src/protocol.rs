//! REST 接口约定：HTTP 方法与资源路径
//!
//! 路径均为相对路径，由客户端拼接到配置的 base URL 上。

use crate::Id;
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 资源路径表
///
/// 测验统一挂在课程下（`/courses/{id}/quizzes`）。
pub struct ApiPaths;

impl ApiPaths {
    // --- Auth ---
    pub const AUTH_LOGIN: &'static str = "/auth/login";
    pub const AUTH_REFRESH: &'static str = "/auth/refresh";
    pub const AUTH_LOGOUT: &'static str = "/auth/logout";

    // --- Users ---
    pub const USERS: &'static str = "/users";
    pub const ME: &'static str = "/me";

    pub fn user(id: &str) -> String {
        format!("/users/{}", id)
    }

    // --- Courses ---
    pub const COURSES: &'static str = "/courses";
    pub const COURSES_CREATED_ME: &'static str = "/courses-created/me";

    pub fn course(id: Id) -> String {
        format!("/courses/{}", id)
    }

    // --- Enrollments ---
    pub const ENROLLMENTS: &'static str = "/enrollments";
    pub const ENROLLMENTS_ME: &'static str = "/enrollments/me";

    pub fn course_enroll(id: Id) -> String {
        format!("/courses/{}/enroll", id)
    }

    pub fn course_enrollments(id: Id) -> String {
        format!("/courses/{}/enrollments", id)
    }

    // --- Lessons ---
    pub fn course_lessons(id: Id) -> String {
        format!("/courses/{}/lessons", id)
    }

    pub fn lesson(id: Id) -> String {
        format!("/lessons/{}", id)
    }

    // --- Materials ---
    pub fn lesson_materials(id: Id) -> String {
        format!("/lessons/{}/materials", id)
    }

    pub fn material(id: Id) -> String {
        format!("/materials/{}", id)
    }

    // --- Quizzes ---
    pub fn course_quizzes(id: Id) -> String {
        format!("/courses/{}/quizzes", id)
    }

    pub fn quiz(id: Id) -> String {
        format!("/quizzes/{}", id)
    }

    // --- Questions ---
    pub fn quiz_questions(id: Id) -> String {
        format!("/quizzes/{}/questions", id)
    }

    pub fn question(id: Id) -> String {
        format!("/questions/{}", id)
    }

    // --- Answers ---
    pub fn question_answers(id: Id) -> String {
        format!("/questions/{}/answers", id)
    }

    pub fn answer(id: Id) -> String {
        format!("/answers/{}", id)
    }

    // --- Submissions ---
    pub fn quiz_submit(id: Id) -> String {
        format!("/quizzes/{}/submit", id)
    }

    pub fn quiz_submissions(id: Id) -> String {
        format!("/quizzes/{}/submissions", id)
    }

    pub fn quiz_submissions_me(id: Id) -> String {
        format!("/quizzes/{}/submissions/me", id)
    }

    pub fn submission(id: Id) -> String {
        format!("/submissions/{}", id)
    }

    // --- Progressions ---
    pub fn course_progression_me(id: Id) -> String {
        format!("/courses/{}/progression/me", id)
    }

    pub fn course_progressions(id: Id) -> String {
        format!("/courses/{}/progressions", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_paths() {
        assert_eq!(ApiPaths::course_enroll(42), "/courses/42/enroll");
        assert_eq!(ApiPaths::course_quizzes(3), "/courses/3/quizzes");
        assert_eq!(ApiPaths::quiz_submissions_me(9), "/quizzes/9/submissions/me");
        assert_eq!(ApiPaths::course_progression_me(1), "/courses/1/progression/me");
        assert_eq!(ApiPaths::user("abc"), "/users/abc");
    }

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }
}
