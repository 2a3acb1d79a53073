use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ItemDoc { pub id: u64, pub name: String, pub description: String }

#[derive(ToSchema)]
pub struct ItemInputDoc { pub name: String, pub description: String }

#[derive(ToSchema)]
pub struct DetailDoc { pub detail: String }

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Item API (typed)",
        description = "In-memory CRUD over a single item resource"
    ),
    paths(
        crate::routes::health,
        crate::routes::typed::list_items,
        crate::routes::typed::create_item,
        crate::routes::typed::get_item,
        crate::routes::typed::update_item,
        crate::routes::typed::delete_item,
    ),
    components(
        schemas(
            HealthResponse,
            ItemDoc,
            ItemInputDoc,
            DetailDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "items")
    )
)]
pub struct ApiDoc;
