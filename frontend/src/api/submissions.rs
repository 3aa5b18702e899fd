use learnify_shared::{ApiPaths, Id, SubmitQuizRequest, Submission};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn submit_quiz(&self, quiz_id: Id, data: &SubmitQuizRequest) -> ApiResult<Submission> {
        self.post(&ApiPaths::quiz_submit(quiz_id), data).await
    }

    pub async fn get_quiz_submissions(&self, quiz_id: Id) -> ApiResult<Vec<Submission>> {
        self.get(&ApiPaths::quiz_submissions(quiz_id)).await
    }

    pub async fn get_my_quiz_submissions(&self, quiz_id: Id) -> ApiResult<Vec<Submission>> {
        self.get(&ApiPaths::quiz_submissions_me(quiz_id)).await
    }

    /// 含逐题作答详情
    pub async fn get_submission(&self, id: Id) -> ApiResult<Submission> {
        self.get(&ApiPaths::submission(id)).await
    }
}
