//! The single-page web UI.

use axum::response::Html;

/// GET / - Single-page download form
///
/// The page is embedded at compile time; it drives the JSON API with
/// fetch() and needs no other static assets.
pub async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../../assets/index.html"))
}
