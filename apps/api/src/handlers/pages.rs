use axum::Json;
use axum::extract::Query;

use crate::dto::{LoginPageQuery, PageResponse};

pub async fn login_page_handler(Query(query): Query<LoginPageQuery>) -> Json<PageResponse> {
    Json(PageResponse {
        page: "login",
        message: "Sign in to continue",
        from: query.from,
    })
}

pub async fn unauthorized_page_handler() -> Json<PageResponse> {
    Json(PageResponse {
        page: "unauthorized",
        message: "You do not have permission to access this page",
        from: None,
    })
}
