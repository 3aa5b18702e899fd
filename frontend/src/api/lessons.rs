use learnify_shared::{ApiPaths, Id, Lesson, LessonRequest};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn create_lesson(&self, course_id: Id, data: &LessonRequest) -> ApiResult<Lesson> {
        self.post(&ApiPaths::course_lessons(course_id), data).await
    }

    pub async fn get_course_lessons(&self, course_id: Id) -> ApiResult<Vec<Lesson>> {
        self.get(&ApiPaths::course_lessons(course_id)).await
    }

    pub async fn get_lesson(&self, id: Id) -> ApiResult<Lesson> {
        self.get(&ApiPaths::lesson(id)).await
    }

    pub async fn update_lesson(&self, id: Id, data: &LessonRequest) -> ApiResult<Lesson> {
        self.put(&ApiPaths::lesson(id), data).await
    }

    pub async fn delete_lesson(&self, id: Id) -> ApiResult<()> {
        self.delete(&ApiPaths::lesson(id)).await
    }
}
