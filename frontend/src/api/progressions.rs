use learnify_shared::{ApiPaths, Id, StudentProgression};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn get_my_progression(&self, course_id: Id) -> ApiResult<StudentProgression> {
        self.get(&ApiPaths::course_progression_me(course_id)).await
    }

    pub async fn get_course_progressions(&self, course_id: Id) -> ApiResult<Vec<StudentProgression>> {
        self.get(&ApiPaths::course_progressions(course_id)).await
    }
}
