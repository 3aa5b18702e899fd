use learnify_shared::{Answer, AnswerRequest, ApiPaths, Id};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn create_answer(&self, question_id: Id, data: &AnswerRequest) -> ApiResult<Answer> {
        self.post(&ApiPaths::question_answers(question_id), data).await
    }

    pub async fn get_question_answers(&self, question_id: Id) -> ApiResult<Vec<Answer>> {
        self.get(&ApiPaths::question_answers(question_id)).await
    }

    pub async fn update_answer(&self, id: Id, data: &AnswerRequest) -> ApiResult<Answer> {
        self.put(&ApiPaths::answer(id), data).await
    }

    pub async fn delete_answer(&self, id: Id) -> ApiResult<()> {
        self.delete(&ApiPaths::answer(id)).await
    }
}
