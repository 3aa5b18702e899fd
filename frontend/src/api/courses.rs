use learnify_shared::{ApiPaths, Course, CourseRequest, Id};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn create_course(&self, data: &CourseRequest) -> ApiResult<Course> {
        self.post(ApiPaths::COURSES, data).await
    }

    pub async fn get_all_courses(&self) -> ApiResult<Vec<Course>> {
        self.get(ApiPaths::COURSES).await
    }

    pub async fn get_course(&self, id: Id) -> ApiResult<Course> {
        self.get(&ApiPaths::course(id)).await
    }

    /// 当前教师创建的课程
    pub async fn get_my_courses_created(&self) -> ApiResult<Vec<Course>> {
        self.get(ApiPaths::COURSES_CREATED_ME).await
    }

    pub async fn update_course(&self, id: Id, data: &CourseRequest) -> ApiResult<Course> {
        self.put(&ApiPaths::course(id), data).await
    }

    pub async fn delete_course(&self, id: Id) -> ApiResult<()> {
        self.delete(&ApiPaths::course(id)).await
    }
}
