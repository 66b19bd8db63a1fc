use utoipa::OpenApi;
use utoipa::ToSchema;
use utoipa_swagger_ui::SwaggerUi;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct AddressDoc { pub city: String, pub country: String }

/// All fields are mandatory when creating a student.
#[derive(ToSchema)]
pub struct CreateStudentDoc {
    pub name: String,
    pub age: i32,
    pub address: AddressDoc,
}

#[derive(ToSchema)]
pub struct CreatedDoc { pub id: String }

#[derive(ToSchema)]
pub struct StudentDoc {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub address: AddressDoc,
}

#[derive(ToSchema)]
pub struct StudentSummaryDoc { pub name: String, pub age: i32 }

/// Only the supplied fields are written; `address` is replaced as a whole.
#[derive(ToSchema)]
pub struct UpdateStudentDoc {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub address: Option<AddressDoc>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Student Records", description = "Create, list, fetch, update and delete student records."),
    paths(
        crate::routes::health,
        crate::routes::students::create,
        crate::routes::students::list,
        crate::routes::students::get,
        crate::routes::students::update,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            AddressDoc,
            CreateStudentDoc,
            CreatedDoc,
            StudentDoc,
            StudentSummaryDoc,
            UpdateStudentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/docs`, backed by the generated document at `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
