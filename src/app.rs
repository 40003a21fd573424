use crate::{
    modules::{self, grade::routes::handler},
    types::Context,
};
use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace;

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

impl App {
    pub fn new(ctx: Arc<Context>) -> Self {
        let router = Self::router(ctx.clone());

        Self { ctx, router }
    }

    /// Grades are served under `/api/grades`; every other path falls through
    /// to the same handler.
    pub fn router(ctx: Arc<Context>) -> Router {
        Router::new()
            .nest("/api", modules::get_router())
            .fallback(handler::handler)
            .with_state(ctx)
            .layer(DefaultBodyLimit::max(1024 * 1024))
            .layer(trace::TraceLayer::new_for_http())
    }

    pub async fn serve(self) -> std::io::Result<()> {
        let address = format!("{}:{}", self.ctx.app.host, self.ctx.app.port);
        let listener = TcpListener::bind(&address).await?;

        tracing::info!("App is running on {}", address);

        axum::serve(listener, self.router).await
    }
}
