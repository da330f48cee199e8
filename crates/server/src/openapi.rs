use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct UserDoc { pub id: i32, pub username: String, pub role: String }

#[derive(ToSchema)]
pub struct UserInputDoc {
    pub username: Option<String>,
    pub password: Option<String>,
    /// `user` or `admin`
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginResponseDoc { pub success: bool, pub token: String, pub user: UserDoc }

#[derive(ToSchema)]
pub struct LoginFailureDoc { pub success: bool, pub message: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct GraveDoc {
    pub id: i32,
    pub name: String,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub section: Option<String>,
    pub row: Option<String>,
    pub plot: Option<String>,
    /// `"x,y"`
    pub coordinates: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct GraveInputDoc {
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub section: Option<String>,
    pub row: Option<String>,
    pub plot: Option<String>,
    /// `{x, y}` object or `"x,y"` string
    pub coordinates: Option<String>,
}

#[derive(ToSchema)]
pub struct SectionDoc {
    pub id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub rows: Option<i32>,
    pub cols: Option<i32>,
}

#[derive(ToSchema)]
pub struct ServiceRequestDoc {
    pub id: i32,
    #[schema(rename = "graveId")]
    pub grave_id: i32,
    #[schema(rename = "serviceType")]
    pub service_type: String,
    pub date: String,
    /// `pending`, `in_progress`, `completed` or a custom label
    pub status: String,
    #[schema(rename = "contactName")]
    pub contact_name: Option<String>,
    #[schema(rename = "contactEmail")]
    pub contact_email: Option<String>,
    #[schema(rename = "contactPhone")]
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
    pub scheduled_date: Option<String>,
    pub services: Vec<String>,
    pub total_cost: Option<f64>,
    pub discount: f64,
    pub admin_notes: Option<String>,
}

#[derive(ToSchema)]
pub struct ServiceRequestInputDoc {
    #[schema(rename = "graveId")]
    pub grave_id: Option<i32>,
    #[schema(rename = "serviceType")]
    pub service_type: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
    #[schema(rename = "contactName")]
    pub contact_name: Option<String>,
    #[schema(rename = "contactEmail")]
    pub contact_email: Option<String>,
    #[schema(rename = "contactPhone")]
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
    pub scheduled_date: Option<String>,
    /// A single item or a list
    pub services: Option<Vec<String>>,
    pub total_cost: Option<f64>,
    pub discount: Option<f64>,
    pub admin_notes: Option<String>,
}

#[derive(ToSchema)]
pub struct StatusDoc { pub status: String }

#[derive(ToSchema)]
pub struct ReservationDoc {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub section: Option<String>,
    pub plot_type: Option<String>,
    pub consultation: Option<bool>,
    pub notes: Option<String>,
    pub admin_notes: Option<String>,
    pub status: Option<String>,
    pub scheduled_date: Option<String>,
    pub created_at: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ArticleDoc {
    pub id: Option<i32>,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub read_time: Option<String>,
    pub is_visible: Option<bool>,
}

#[derive(ToSchema)]
pub struct ServiceItemDoc {
    pub id: Option<i32>,
    pub name: String,
    pub slug: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

#[derive(ToSchema)]
pub struct ContactMessageDoc {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: Option<String>,
    pub admin_notes: Option<String>,
    pub created_at: Option<String>,
}

#[derive(ToSchema)]
pub struct FaqDoc {
    pub id: Option<i32>,
    pub question: String,
    pub answer: String,
    pub display_order: Option<i32>,
}

#[derive(ToSchema)]
pub struct CategoryDoc { pub id: Option<i32>, pub name: String }

#[derive(ToSchema)]
pub struct DashboardStatsDoc { pub graves: u64, pub requests: u64, pub messages: u64, pub reservations: u64 }

#[derive(ToSchema)]
pub struct DashboardEventDoc {
    /// `<type>_<id>`
    pub id: String,
    /// `request`, `reservation` or `message`
    #[schema(rename = "type")]
    pub kind: String,
    pub title: String,
    pub date: String,
    pub status: String,
    pub details: Option<String>,
}

#[derive(ToSchema)]
pub struct DashboardDoc { pub stats: DashboardStatsDoc, pub events: Vec<DashboardEventDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::dashboard::show,
        crate::routes::dev::seed_data,
        crate::routes::graves::list,
        crate::routes::graves::get,
        crate::routes::graves::create,
        crate::routes::graves::update,
        crate::routes::graves::delete,
        crate::routes::sections::list,
        crate::routes::sections::create,
        crate::routes::sections::update,
        crate::routes::sections::delete,
        crate::routes::service_requests::list,
        crate::routes::service_requests::get,
        crate::routes::service_requests::create,
        crate::routes::service_requests::update,
        crate::routes::service_requests::update_status,
        crate::routes::service_requests::delete,
        crate::routes::reservations::list,
        crate::routes::reservations::create,
        crate::routes::reservations::update,
        crate::routes::reservations::delete,
        crate::routes::articles::list_public,
        crate::routes::articles::list_admin,
        crate::routes::articles::create,
        crate::routes::articles::update,
        crate::routes::articles::delete,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::contact::list,
        crate::routes::contact::create,
        crate::routes::contact::update,
        crate::routes::contact::delete,
        crate::routes::faqs::list,
        crate::routes::faqs::create,
        crate::routes::faqs::update,
        crate::routes::faqs::delete,
        crate::routes::categories::list,
        crate::routes::categories::create,
        crate::routes::categories::update,
        crate::routes::categories::delete,
        crate::routes::users::list,
        crate::routes::users::create,
        crate::routes::users::update,
        crate::routes::users::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ErrorDoc,
            LoginRequest,
            LoginResponseDoc,
            LoginFailureDoc,
            UserDoc,
            UserInputDoc,
            GraveDoc,
            GraveInputDoc,
            SectionDoc,
            ServiceRequestDoc,
            ServiceRequestInputDoc,
            StatusDoc,
            ReservationDoc,
            ArticleDoc,
            ServiceItemDoc,
            ContactMessageDoc,
            FaqDoc,
            CategoryDoc,
            DashboardStatsDoc,
            DashboardEventDoc,
            DashboardDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "dashboard"),
        (name = "dev"),
        (name = "graves"),
        (name = "sections"),
        (name = "service-requests"),
        (name = "reservations"),
        (name = "articles"),
        (name = "services"),
        (name = "contact"),
        (name = "faqs"),
        (name = "categories"),
        (name = "users")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_api_paths() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/login"));
        assert!(paths.contains_key("/api/admin/service-requests/{id}/status"));
        assert!(paths.contains_key("/api/admin/users/{id}"));
    }
}
