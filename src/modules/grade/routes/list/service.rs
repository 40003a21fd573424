use super::types::response;
use crate::{
    modules::grade::{routes::types::response::Response, summary},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> Response<response::Success> {
    tracing::info!("Processing GET request");

    let items = ctx.store.scan().await?;
    tracing::debug!("Scan returned {} items", items.len());

    let grades = summary::numeric_entries(items);
    let average = summary::average(&grades);

    Ok(response::Success::Grades { grades, average })
}
