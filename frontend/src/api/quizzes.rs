use learnify_shared::{ApiPaths, Id, Quiz, QuizRequest};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn create_quiz(&self, course_id: Id, data: &QuizRequest) -> ApiResult<Quiz> {
        self.post(&ApiPaths::course_quizzes(course_id), data).await
    }

    pub async fn get_course_quizzes(&self, course_id: Id) -> ApiResult<Vec<Quiz>> {
        self.get(&ApiPaths::course_quizzes(course_id)).await
    }

    pub async fn get_quiz(&self, id: Id) -> ApiResult<Quiz> {
        self.get(&ApiPaths::quiz(id)).await
    }

    pub async fn update_quiz(&self, id: Id, data: &QuizRequest) -> ApiResult<Quiz> {
        self.put(&ApiPaths::quiz(id), data).await
    }

    pub async fn delete_quiz(&self, id: Id) -> ApiResult<()> {
        self.delete(&ApiPaths::quiz(id)).await
    }
}
