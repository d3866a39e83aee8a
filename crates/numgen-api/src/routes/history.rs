//! Routes for the generation history.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use numgen_generator::application::command_handlers;
use numgen_generator::application::query_handlers::{self, ExportOutcome, HistoryView};
use numgen_generator::domain::commands;
use numgen_generator::domain::statistics::Statistics;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{NoticeView, notices};
use crate::error::ApiError;
use crate::state::AppState;

/// Query string for DELETE /.
#[derive(Debug, Default, Deserialize)]
pub struct ClearParams {
    /// Must be `true` for the history to be cleared.
    pub confirm: Option<bool>,
}

/// Response body for DELETE /.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    /// Entries removed.
    pub removed: usize,
    /// Notices to display.
    pub warnings: Vec<NoticeView>,
}

/// Response body for GET /export when there is nothing to export.
#[derive(Debug, Serialize)]
pub struct EmptyExportResponse {
    /// Always `false`.
    pub exported: bool,
    /// Notices to display.
    pub warnings: Vec<NoticeView>,
}

/// GET /
async fn list(State(state): State<AppState>) -> Result<Json<HistoryView>, ApiError> {
    Ok(Json(query_handlers::get_history(&state.generator)?))
}

/// GET /statistics
async fn statistics(State(state): State<AppState>) -> Result<Json<Statistics>, ApiError> {
    Ok(Json(query_handlers::get_statistics(&state.generator)?))
}

/// DELETE /?confirm=true
#[instrument(skip(state))]
async fn clear(
    State(state): State<AppState>,
    Query(params): Query<ClearParams>,
) -> Result<Json<ClearResponse>, ApiError> {
    let command = commands::ClearHistory {
        correlation_id: Uuid::new_v4(),
        confirmed: params.confirm.unwrap_or(false),
    };

    let cleared =
        command_handlers::handle_clear_history(&command, &state.generator, &state.persister)
            .await?;

    Ok(Json(ClearResponse {
        removed: cleared.removed,
        warnings: notices(cleared.warning),
    }))
}

/// GET /export
///
/// Responds with a CSV attachment, or a JSON notice when the history is
/// empty.
#[instrument(skip(state))]
async fn export(State(state): State<AppState>) -> Result<Response, ApiError> {
    match query_handlers::export_history(&state.generator, state.clock.as_ref())? {
        ExportOutcome::Csv { file_name, content } => {
            info!(%file_name, bytes = content.len(), "exporting history");
            let disposition = format!("attachment; filename=\"{file_name}\"");
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                content,
            )
                .into_response())
        }
        ExportOutcome::Empty(warning) => Ok(Json(EmptyExportResponse {
            exported: false,
            warnings: notices(Some(warning)),
        })
        .into_response()),
    }
}

/// Returns the router for the history.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).delete(clear))
        .route("/statistics", get(statistics))
        .route("/export", get(export))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use numgen_core::clock::Clock;
    use numgen_core::store::HistoryStore;
    use numgen_generator::domain::range::Range;
    use numgen_generator::domain::reveal::RevealPlan;
    use numgen_generator::domain::state::GeneratorState;
    use numgen_test_support::{FixedClock, InMemoryHistoryStore, MockRng};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn app_state_with(numbers: &[i64], store: Arc<InMemoryHistoryStore>) -> AppState {
        let mut generator = GeneratorState::new();
        for &n in numbers {
            generator.generate(Range::new(n, 100).unwrap(), false, &mut MockRng, &fixed_clock());
        }
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(fixed_clock());
        let store: Arc<dyn HistoryStore> = store;
        AppState::new(
            clock,
            Arc::new(Mutex::new(MockRng)),
            store,
            generator,
            RevealPlan::instant(),
        )
    }

    fn request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn json_of(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_entries_newest_first_with_statistics() {
        // Arrange
        let app = router().with_state(app_state_with(&[3, 7, 5], Arc::default()));

        // Act
        let response = app.oneshot(request("GET", "/")).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_of(response).await;
        let numbers: Vec<i64> = json["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["number"].as_i64().unwrap())
            .collect();
        assert_eq!(numbers, vec![5, 7, 3]);
        assert_eq!(json["statistics"]["count"], 3);
        assert_eq!(json["statistics"]["average"], 5.0);
    }

    #[tokio::test]
    async fn test_statistics_on_empty_history_are_zero() {
        let app = router().with_state(app_state_with(&[], Arc::default()));

        let response = app.oneshot(request("GET", "/statistics")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_of(response).await;
        assert_eq!(json["count"], 0);
        assert_eq!(json["average"], 0.0);
        assert_eq!(json["max"], 0);
        assert_eq!(json["min"], 0);
    }

    #[tokio::test]
    async fn test_clear_without_confirmation_returns_400() {
        let app_state = app_state_with(&[1, 2], Arc::default());
        let app = router().with_state(app_state.clone());

        let response = app.oneshot(request("DELETE", "/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_of(response).await;
        assert_eq!(json["error"], "confirmation_required");
        assert_eq!(app_state.generator.lock().unwrap().history().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_with_confirmation_empties_and_persists() {
        let store = Arc::new(InMemoryHistoryStore::default());
        let app_state = app_state_with(&[1, 2], Arc::clone(&store));
        let app = router().with_state(app_state.clone());

        let response = app
            .oneshot(request("DELETE", "/?confirm=true"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_of(response).await;
        assert_eq!(json["removed"], 2);
        assert!(json["warnings"].as_array().unwrap().is_empty());
        assert!(app_state.generator.lock().unwrap().history().is_empty());
        assert_eq!(store.save_count(), 1);
        assert!(store.entries().is_empty());
    }

    #[tokio::test]
    async fn test_clear_empty_history_warns() {
        let store = Arc::new(InMemoryHistoryStore::default());
        let app = router().with_state(app_state_with(&[], Arc::clone(&store)));

        let response = app
            .oneshot(request("DELETE", "/?confirm=true"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_of(response).await;
        assert_eq!(json["removed"], 0);
        assert_eq!(json["warnings"][0]["code"], "empty_history");
        assert_eq!(json["warnings"][0]["message"], "No history to clear");
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_export_returns_csv_attachment() {
        let app = router().with_state(app_state_with(&[7], Arc::default()));

        let response = app.oneshot(request("GET", "/export")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"random_numbers_2026-01-15.csv\""
        );
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert_eq!(
            body,
            "\"Number\",\"Range\",\"Timestamp\"\n\"7\",\"7 - 100\",\"2026-01-15 10:00:00 UTC\""
        );
    }

    #[tokio::test]
    async fn test_export_empty_history_returns_notice() {
        let app = router().with_state(app_state_with(&[], Arc::default()));

        let response = app.oneshot(request("GET", "/export")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_of(response).await;
        assert_eq!(json["exported"], false);
        assert_eq!(json["warnings"][0]["message"], "No history to export");
    }
}
