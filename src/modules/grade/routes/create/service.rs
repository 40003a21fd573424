use super::types::{request, response};
use crate::{
    modules::grade::{
        repository::GradeRecord,
        routes::types::response::{Error, Failure, Response},
        summary,
    },
    types::Context,
};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, body: Option<String>) -> Response<response::Success> {
    tracing::info!("Processing POST request");

    let body = body.ok_or(Failure::MissingBody)?;
    let parsed = serde_json::from_str::<Value>(&body).map_err(Failure::from)?;

    if parsed.is_null() {
        return Err(Failure::NullBody.into());
    }

    let payload = request::Payload::from(&parsed);
    tracing::debug!(
        "Parsed data - student_id: {:?}, grade: {}",
        payload.student_id,
        payload.grade
    );

    payload.validate().map_err(|errors| {
        tracing::debug!("Rejected grade submission: {}", errors);
        Error::InvalidStudentIdOrGrade
    })?;

    let record = GradeRecord {
        student_id: payload.student_id,
        timestamp: chrono::Utc::now().timestamp_millis(),
        grade: payload.grade,
    };

    ctx.store.put(record).await?;
    tracing::info!("Item saved successfully");

    let grades = summary::numeric_entries(ctx.store.scan().await?);

    Ok(response::Success::Saved {
        average: summary::average(&grades),
        items_saved: grades.len(),
    })
}
