use learnify_shared::{ApiPaths, Id, Material, MaterialRequest};

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn create_material(&self, lesson_id: Id, data: &MaterialRequest) -> ApiResult<Material> {
        self.post(&ApiPaths::lesson_materials(lesson_id), data).await
    }

    pub async fn get_lesson_materials(&self, lesson_id: Id) -> ApiResult<Vec<Material>> {
        self.get(&ApiPaths::lesson_materials(lesson_id)).await
    }

    pub async fn update_material(&self, id: Id, data: &MaterialRequest) -> ApiResult<Material> {
        self.put(&ApiPaths::material(id), data).await
    }

    pub async fn delete_material(&self, id: Id) -> ApiResult<()> {
        self.delete(&ApiPaths::material(id)).await
    }
}
