use std::{sync::Arc, time::Instant};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use log::info;
use recordstore_core::{core_version, ping, Access, Record, RecordDraft, RecordId};
use serde::Serialize;

use crate::{error::ApiError, state::AppState};

pub const STATUS_SUCCESS: &str = "SUCCESS";

/// Success envelope shared by every record route.
#[derive(Debug, Serialize)]
pub struct RecordsEnvelope {
    pub status: &'static str,
    pub records: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub struct HealthEnvelope {
    pub status: &'static str,
    pub ping: &'static str,
    pub version: &'static str,
}

pub async fn health_handler() -> Json<HealthEnvelope> {
    Json(HealthEnvelope {
        status: STATUS_SUCCESS,
        ping: ping(),
        version: core_version(),
    })
}

pub async fn list_records_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RecordsEnvelope>, ApiError> {
    let started_at = Instant::now();
    let result = state
        .run(Access::Read, |service| service.list_all())
        .await;

    finish("list", started_at, result)
}

pub async fn create_record_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecordDraft>, JsonRejection>,
) -> Result<Json<RecordsEnvelope>, ApiError> {
    let started_at = Instant::now();
    let result = match payload {
        Ok(Json(draft)) => {
            state
                .run(Access::Write, move |service| service.create(&draft))
                .await
        }
        Err(rejection) => Err(ApiError::MalformedPayload(rejection.body_text())),
    };

    finish("create", started_at, result)
}

pub async fn delete_record_handler(
    State(state): State<Arc<AppState>>,
    id: Result<Path<RecordId>, PathRejection>,
) -> Result<Json<RecordsEnvelope>, ApiError> {
    let started_at = Instant::now();
    let result = match id {
        Ok(Path(id)) => {
            state
                .run(Access::Write, move |service| service.delete(id))
                .await
        }
        Err(rejection) => Err(ApiError::MalformedPayload(rejection.body_text())),
    };

    finish("delete", started_at, result)
}

fn finish(
    route: &str,
    started_at: Instant,
    result: Result<Vec<Record>, ApiError>,
) -> Result<Json<RecordsEnvelope>, ApiError> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(records) => info!(
            "event=http_request module=http route={route} status=ok count={} duration_ms={duration_ms}",
            records.len()
        ),
        Err(err) => info!(
            "event=http_request module=http route={route} status=error code={} duration_ms={duration_ms}",
            err.code()
        ),
    }

    result.map(|records| {
        Json(RecordsEnvelope {
            status: STATUS_SUCCESS,
            records,
        })
    })
}
