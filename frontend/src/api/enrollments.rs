use learnify_shared::{
    ApiPaths, Enrollment, EnrollmentCourseSummary, EnrollmentStudentSummary, Id,
};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    /// 选课；重复选课由后端返回 400
    pub async fn enroll_in_course(&self, course_id: Id) -> ApiResult<Option<Enrollment>> {
        self.post_empty(&ApiPaths::course_enroll(course_id)).await
    }

    pub async fn get_my_enrollments(&self) -> ApiResult<Vec<EnrollmentCourseSummary>> {
        self.get(ApiPaths::ENROLLMENTS_ME).await
    }

    pub async fn get_course_enrollments(&self, course_id: Id) -> ApiResult<Vec<EnrollmentStudentSummary>> {
        self.get(&ApiPaths::course_enrollments(course_id)).await
    }

    pub async fn get_all_enrollments(&self) -> ApiResult<Vec<Enrollment>> {
        self.get(ApiPaths::ENROLLMENTS).await
    }
}
