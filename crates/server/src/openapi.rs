use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentInputDoc {
    /// At most 50 characters
    pub first_name: Option<String>,
    /// At most 50 characters
    pub last_name: Option<String>,
    #[schema(value_type = String, format = Date, example = "2000-01-01")]
    pub date_of_birth: String,
    /// At most 100 characters
    pub major: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDoc {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[schema(value_type = String, format = Date, example = "2000-01-01")]
    pub date_of_birth: String,
    pub major: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StudentEnvelopeDoc {
    pub status: u16,
    pub message: String,
    pub data: Option<StudentDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct StudentListEnvelopeDoc {
    pub status: u16,
    pub message: String,
    pub data: Option<Vec<StudentDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list,
        crate::routes::students::get,
        crate::routes::students::search,
        crate::routes::students::create,
        crate::routes::students::create_many,
        crate::routes::students::update,
        crate::routes::students::delete,
        crate::routes::students::delete_all,
    ),
    components(
        schemas(
            HealthResponse,
            StudentInputDoc,
            StudentDoc,
            StudentEnvelopeDoc,
            StudentListEnvelopeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_student_path() {
        let doc = ApiDoc::openapi();
        for p in ["/health", "/api/std", "/api/std/{id}", "/api/std/search", "/api/std/bulk", "/api/std/all"] {
            assert!(doc.paths.paths.contains_key(p), "missing {p}");
        }
    }
}
