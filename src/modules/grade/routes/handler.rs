use super::types::{
    request,
    response::{Error, Failure, Reply},
};
use crate::types::Context;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::Method,
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!("Could not read request body: {}", rejection);
            return Reply::from(Error::from(Failure::UnreadableBody(rejection.body_text())));
        }
    };

    let event = request::Event {
        http_method: Some(method.as_str().to_string()),
        body: match body.is_empty() {
            true => None,
            false => Some(String::from_utf8_lossy(&body).into_owned()),
        },
    };

    super::handle(ctx, event).await
}
