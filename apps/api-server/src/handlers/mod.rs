//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpRequest, HttpResponse, web};
use blog_shared::ErrorResponse;

/// Configure all application routes.
///
/// `/search` is registered before `/{id}` so it is not captured as an id.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(extractor_error))
        .app_data(web::JsonConfig::default().error_handler(extractor_error))
        .app_data(web::QueryConfig::default().error_handler(extractor_error))
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/posts")
                // Public routes
                .route("", web::get().to(posts::list_posts))
                .route("/search", web::get().to(posts::search_posts))
                .route("/{id}", web::get().to(posts::get_post))
                // Protected routes
                .route("", web::post().to(posts::create_post))
                .route("/{id}", web::put().to(posts::update_post))
                .route("/{id}", web::delete().to(posts::delete_post)),
        );
}

/// GET / - API index.
async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "RESTful Blog API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "posts": "/api/posts",
            "health": "/health",
        },
    }))
}

/// Malformed path ids, bodies, and query strings all render the same
/// RFC 7807 shape as handler-level failures.
fn extractor_error<E>(err: E, _req: &HttpRequest) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let response = HttpResponse::BadRequest().json(ErrorResponse::bad_request(err.to_string()));
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Catch-all for unknown routes.
pub async fn not_found(
    req: actix_web::HttpRequest,
    request_id: crate::observability::RequestId,
) -> HttpResponse {
    tracing::warn!(method = %req.method(), path = %req.path(), "Route not found");
    HttpResponse::NotFound().json(
        ErrorResponse::not_found("Route not found").with_request_id(request_id.as_str()),
    )
}
