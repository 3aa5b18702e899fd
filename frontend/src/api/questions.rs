use learnify_shared::{ApiPaths, Id, Question, QuestionRequest};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn create_question(&self, quiz_id: Id, data: &QuestionRequest) -> ApiResult<Question> {
        self.post(&ApiPaths::quiz_questions(quiz_id), data).await
    }

    pub async fn get_quiz_questions(&self, quiz_id: Id) -> ApiResult<Vec<Question>> {
        self.get(&ApiPaths::quiz_questions(quiz_id)).await
    }

    pub async fn update_question(&self, id: Id, data: &QuestionRequest) -> ApiResult<Question> {
        self.put(&ApiPaths::question(id), data).await
    }

    pub async fn delete_question(&self, id: Id) -> ApiResult<()> {
        self.delete(&ApiPaths::question(id)).await
    }
}
