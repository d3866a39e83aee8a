//! Routes for number generation.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use numgen_core::error::DomainError;
use numgen_generator::application::command_handlers;
use numgen_generator::application::query_handlers::{self, EntryView};
use numgen_generator::domain::batch::DEFAULT_BATCH_SIZE;
use numgen_generator::domain::commands;
use numgen_generator::domain::range::Range;
use numgen_generator::domain::state::Settings;
use numgen_generator::domain::statistics::Statistics;
use serde::{Deserialize, Serialize};
use tracing::{Instrument, info, instrument};
use uuid::Uuid;

use super::{NoticeView, notices};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /generate. Omitted fields fall back to the last
/// used settings.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    /// Lower bound (inclusive).
    pub min: Option<i64>,
    /// Upper bound (inclusive).
    pub max: Option<i64>,
    /// Skip values already in the history.
    pub exclude_seen: Option<bool>,
    /// Play the reveal before committing (default `false`).
    pub animate: Option<bool>,
}

/// Request body for POST /generate-batch.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateBatchRequest {
    /// Lower bound (inclusive).
    pub min: Option<i64>,
    /// Upper bound (inclusive).
    pub max: Option<i64>,
    /// Skip values already in the history or earlier in the batch.
    pub exclude_seen: Option<bool>,
    /// Requested draws (default 10), capped at the range size.
    pub count: Option<usize>,
}

/// Response body for POST /generate.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// The committed number.
    pub number: i64,
    /// The history entry created for it.
    pub entry: EntryView,
    /// Cosmetic reveal values, empty when not animated.
    pub frames: Vec<i64>,
    /// Milliseconds between reveal frames.
    pub frame_interval_ms: u64,
    /// Statistics after the append.
    pub statistics: Statistics,
    /// Notices to display.
    pub warnings: Vec<NoticeView>,
}

/// Response body for POST /generate-batch.
#[derive(Debug, Serialize)]
pub struct GenerateBatchResponse {
    /// Numbers in generation order.
    pub numbers: Vec<i64>,
    /// How many numbers were generated.
    pub count: usize,
    /// Statistics after the batch.
    pub statistics: Statistics,
    /// Notices to display.
    pub warnings: Vec<NoticeView>,
}

/// POST /generate
///
/// Dropped with 409 while another single generation is in flight. The
/// reveal and commit run in their own task, so a client that disconnects
/// mid-reveal still gets its number recorded and the gate released.
#[instrument(skip(state, request))]
async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let settings = query_handlers::get_settings(&state.generator)?;
    let command = commands::GenerateNumber {
        correlation_id: Uuid::new_v4(),
        min: request.min.unwrap_or(settings.range.min()),
        max: request.max.unwrap_or(settings.range.max()),
        exclude_seen: request.exclude_seen.unwrap_or(settings.exclude_seen),
    };

    // A rejected range must not hold the gate.
    Range::new(command.min, command.max)?;

    let Some(permit) = state.gate.try_acquire() else {
        info!(correlation_id = %command.correlation_id, "generation in progress, dropping request");
        return Err(DomainError::GenerationInProgress.into());
    };

    let animate = request.animate.unwrap_or(false);
    let task_state = state.clone();
    let task = tokio::spawn(async move {
        let _permit = permit;
        let frames = if animate {
            let frames = command_handlers::draw_reveal_frames(
                command.min,
                command.max,
                task_state.reveal,
                &task_state.rng,
            )?;
            tokio::time::sleep(task_state.reveal.duration()).await;
            frames
        } else {
            Vec::new()
        };

        let generated = command_handlers::handle_generate_number(
            &command,
            &task_state.generator,
            task_state.clock.as_ref(),
            &task_state.rng,
            &task_state.persister,
        )
        .await?;
        Ok::<_, DomainError>((frames, generated))
    }
    .in_current_span());

    let (frames, generated) = task
        .await
        .map_err(|e| DomainError::Infrastructure(format!("generation task failed: {e}")))??;

    #[allow(clippy::cast_possible_truncation)]
    let frame_interval_ms = if animate {
        state.reveal.step_interval().as_millis() as u64
    } else {
        0
    };

    Ok(Json(GenerateResponse {
        number: generated.entry.number(),
        entry: EntryView::from(&generated.entry),
        frames,
        frame_interval_ms,
        statistics: generated.statistics,
        warnings: notices(generated.warning),
    }))
}

/// POST /generate-batch
#[instrument(skip(state, request))]
async fn generate_batch(
    State(state): State<AppState>,
    Json(request): Json<GenerateBatchRequest>,
) -> Result<Json<GenerateBatchResponse>, ApiError> {
    let settings = query_handlers::get_settings(&state.generator)?;
    let command = commands::GenerateBatch {
        correlation_id: Uuid::new_v4(),
        min: request.min.unwrap_or(settings.range.min()),
        max: request.max.unwrap_or(settings.range.max()),
        exclude_seen: request.exclude_seen.unwrap_or(settings.exclude_seen),
        count: request.count.unwrap_or(DEFAULT_BATCH_SIZE),
    };

    let generated = command_handlers::handle_generate_batch(
        &command,
        &state.generator,
        state.clock.as_ref(),
        &state.rng,
        &state.persister,
    )
    .await?;

    Ok(Json(GenerateBatchResponse {
        count: generated.numbers.len(),
        numbers: generated.numbers,
        statistics: generated.statistics,
        warnings: notices(generated.warning),
    }))
}

/// GET /settings
async fn settings(State(state): State<AppState>) -> Result<Json<Settings>, ApiError> {
    Ok(Json(query_handlers::get_settings(&state.generator)?))
}

/// Returns the router for number generation.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/generate-batch", post(generate_batch))
        .route("/settings", get(settings))
}
