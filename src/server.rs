use crate::builder;
use crate::config::AppConfig;
use crate::export::{self, CSV_FILE_NAME};
use crate::render;
use crate::types::Attraction;
use anyhow::Result;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Pages and payloads are rendered once at startup; handlers only hand
/// them out.
pub struct AppState {
    pub dashboard_html: String,
    pub map_html: String,
    pub csv_body: String,
    pub attractions: Vec<Attraction>,
}

#[derive(Serialize)]
struct AttractionsResponse {
    total: usize,
    attractions: Vec<Attraction>,
}

pub async fn start_server(config: AppConfig, attractions: Vec<Attraction>) -> Result<()> {
    println!("Building map for {} attractions...", attractions.len());
    let doc = builder::build_map(&attractions)?;

    let state = Arc::new(AppState {
        dashboard_html: render::render_dashboard_html(&config.page, "/map", "/attractions.csv"),
        map_html: render::render_map_html(&doc),
        csv_body: export::csv_string(&attractions)?,
        attractions,
    });

    let port = config.server.port;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    println!("Starting server on http://{}", addr);

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/map", get(map_handler))
        .route("/attractions.csv", get(csv_handler))
        .route("/api/attractions", get(attractions_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.dashboard_html.clone())
}

async fn map_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.map_html.clone())
}

async fn csv_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
        ),
    ];
    (headers, state.csv_body.clone())
}

async fn attractions_handler(State(state): State<Arc<AppState>>) -> Json<AttractionsResponse> {
    info!("Serving {} attractions as JSON", state.attractions.len());
    Json(AttractionsResponse {
        total: state.attractions.len(),
        attractions: state.attractions.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::data::builtin_attractions;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        let attractions = builtin_attractions();
        let page = PageConfig {
            title: "Malaysia Tourist Attractions Map".to_string(),
            intro: "Explore the tourist attractions across Malaysia.".to_string(),
            map_width: 700,
            map_height: 500,
        };
        let doc = builder::build_map(&attractions).unwrap();
        let state = Arc::new(AppState {
            dashboard_html: render::render_dashboard_html(&page, "/map", "/attractions.csv"),
            map_html: render::render_map_html(&doc),
            csv_body: export::csv_string(&attractions).unwrap(),
            attractions,
        });
        router(state)
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn dashboard_page_is_served() {
        let (status, body) = get_body(test_app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Malaysia Tourist Attractions Map</h1>"));
        assert!(body.contains(r#"<iframe src="/map""#));
    }

    #[tokio::test]
    async fn map_page_is_served() {
        let (status, body) = get_body(test_app(), "/map").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("L.map('map').setView([4.2105, 101.9758], 6);"));
    }

    #[tokio::test]
    async fn csv_download_has_content_type_and_rows() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/attractions.csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"malaysia_tourist_attractions.csv\""
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.starts_with("Name,Latitude,Longitude,Description,Type\n"));
        assert_eq!(body.lines().count(), 7);
    }

    #[tokio::test]
    async fn api_lists_attractions() {
        let (status, body) = get_body(test_app(), "/api/attractions").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["total"], 6);
        assert_eq!(json["attractions"].as_array().unwrap().len(), 6);
        assert_eq!(json["attractions"][0]["name"], "Petronas Twin Towers");
        assert_eq!(json["attractions"][0]["type"], "Historical Site");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (status, _) = get_body(test_app(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
