use std::rc::Rc;

use learnify_shared::{
    CourseRequest, HttpMethod, LoginRequest, QuestionResponse, SubmitQuizRequest,
};
use serde_json::json;

use crate::config::ClientConfig;
use crate::http::{ApiClient, MemoryTokenStore, MockHttpClient, TokenStore};

const BASE: &str = "http://api.test";

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn setup(token: Option<&str>) -> (ApiClient, Rc<MockHttpClient>, Rc<MemoryTokenStore>) {
    let mock = Rc::new(MockHttpClient::new());
    let tokens = Rc::new(match token {
        Some(t) => MemoryTokenStore::with_token(t),
        None => MemoryTokenStore::new(),
    });
    let client = ApiClient::new(ClientConfig::new(BASE), mock.clone(), tokens.clone());
    (client, mock, tokens)
}

#[tokio::test]
async fn test_login_posts_credentials_and_reads_token() {
    let (client, mock, _) = setup(None);
    mock.mock_response(
        HttpMethod::Post,
        &url("/auth/login"),
        200,
        json!({ "accessToken": "T1" }),
    );

    let token = client
        .login(&LoginRequest {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(token.access_token, "T1");
    let sent = mock.last_request(HttpMethod::Post, &url("/auth/login")).unwrap();
    assert_eq!(
        sent.body.as_deref(),
        Some(r#"{"email":"a@b.com","password":"x"}"#)
    );
}

#[tokio::test]
async fn test_logout_ignores_response_body() {
    let (client, mock, _) = setup(Some("T1"));
    mock.mock_response(HttpMethod::Post, &url("/auth/logout"), 200, json!({ "ok": true }));

    client.logout().await.unwrap();
    assert_eq!(mock.count(HttpMethod::Post, &url("/auth/logout")), 1);
}

#[tokio::test]
async fn test_refresh_stores_new_token() {
    let (client, mock, tokens) = setup(None);
    mock.mock_response(HttpMethod::Post, &url("/auth/refresh"), 200, json!({ "token": "T2" }));

    assert_eq!(client.refresh().await.unwrap(), "T2");
    assert_eq!(tokens.load().as_deref(), Some("T2"));
}

#[tokio::test]
async fn test_enroll_already_enrolled_surfaces_server_message() {
    let (client, mock, _) = setup(Some("T1"));
    mock.mock_response(
        HttpMethod::Post,
        &url("/courses/42/enroll"),
        400,
        json!({ "error": "Student is already enrolled in this course" }),
    );

    let err = client.enroll_in_course(42).await.unwrap_err();

    assert_eq!(err.status, Some(400));
    assert_eq!(err.message, "Student is already enrolled in this course");
    assert!(err.errors.is_empty());
    assert_eq!(mock.count(HttpMethod::Post, &url("/auth/refresh")), 0);
}

#[tokio::test]
async fn test_enroll_returns_created_enrollment() {
    let (client, mock, _) = setup(Some("T1"));
    mock.mock_response(
        HttpMethod::Post,
        &url("/courses/42/enroll"),
        201,
        json!({ "studentId": 7, "courseId": 42, "enrolledAt": "2025-01-15T10:30:00" }),
    );

    let enrollment = client.enroll_in_course(42).await.unwrap().unwrap();
    assert_eq!(enrollment.course_id, 42);
    assert_eq!(enrollment.student_id, 7);
}

#[tokio::test]
async fn test_my_enrollments_and_progression() {
    let (client, mock, _) = setup(Some("T1"));
    mock.mock_response(
        HttpMethod::Get,
        &url("/enrollments/me"),
        200,
        json!([{ "id": 3, "title": "Rust 101", "teacherId": 2, "firstName": "Ana", "lastName": "Lee" }]),
    );
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/3/progression/me"),
        200,
        json!({ "progressionPercent": 50.0, "averageScore": 80.0 }),
    );

    let courses = client.get_my_enrollments().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].title, "Rust 101");

    let progression = client.get_my_progression(3).await.unwrap();
    assert_eq!(progression.progress_percent, 50.0);
}

#[tokio::test]
async fn test_course_crud_paths() {
    let (client, mock, _) = setup(Some("T1"));
    let course = json!({ "id": 5, "title": "Algebra" });
    mock.mock_response(HttpMethod::Post, &url("/courses"), 201, course.clone());
    mock.mock_response(HttpMethod::Put, &url("/courses/5"), 200, course.clone());
    mock.mock_response(HttpMethod::Delete, &url("/courses/5"), 204, json!(null));
    mock.mock_response(HttpMethod::Get, &url("/courses-created/me"), 200, json!([course]));

    let request = CourseRequest {
        title: "Algebra".to_string(),
        ..Default::default()
    };
    assert_eq!(client.create_course(&request).await.unwrap().id, 5);
    assert_eq!(client.update_course(5, &request).await.unwrap().title, "Algebra");
    client.delete_course(5).await.unwrap();
    assert_eq!(client.get_my_courses_created().await.unwrap().len(), 1);

    let sent = mock.last_request(HttpMethod::Post, &url("/courses")).unwrap();
    assert_eq!(sent.body.as_deref(), Some(r#"{"title":"Algebra"}"#));
}

#[tokio::test]
async fn test_quiz_routes_use_course_scoped_path() {
    let (client, mock, _) = setup(Some("T1"));
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/3/quizzes"),
        200,
        json!([{ "id": 9, "title": "Week 1", "courseId": 3 }]),
    );

    let quizzes = client.get_course_quizzes(3).await.unwrap();
    assert_eq!(quizzes[0].id, 9);
}

#[tokio::test]
async fn test_submit_quiz_sends_bare_answer_array() {
    let (client, mock, _) = setup(Some("T1"));
    mock.mock_response(
        HttpMethod::Post,
        &url("/quizzes/9/submit"),
        201,
        json!({ "id": 1, "score": 100.0, "quizId": 9, "studentId": 7 }),
    );

    let submission = client
        .submit_quiz(
            9,
            &SubmitQuizRequest {
                answers: vec![QuestionResponse {
                    question_id: 4,
                    answer_id: Some(12),
                    text_answer: None,
                }],
            },
        )
        .await
        .unwrap();

    assert_eq!(submission.score, Some(100.0));
    assert!(submission.answers.is_empty());
    let sent = mock.last_request(HttpMethod::Post, &url("/quizzes/9/submit")).unwrap();
    assert_eq!(sent.body.as_deref(), Some(r#"[{"questionId":4,"answerId":12}]"#));
}

#[tokio::test]
async fn test_user_profile_routes() {
    let (client, mock, _) = setup(Some("T1"));
    let me = json!({ "id": 7, "firstName": "Ana", "lastName": "Lee", "email": "a@b.com", "role": "STUDENT" });
    mock.mock_response(HttpMethod::Get, &url("/me"), 200, me.clone());
    mock.mock_response(HttpMethod::Get, &url("/users/7"), 200, me);

    assert_eq!(client.get_me().await.unwrap().id, "7");
    assert_eq!(client.get_user("7").await.unwrap().email, "a@b.com");
}
