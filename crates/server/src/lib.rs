//! Outreach HTTP Server
//!
//! Actix-web form page and JSON API around the draft workflow

use actix_web::{web, App, HttpServer};
use outreach_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod page;
pub mod routes;
pub mod state;
pub mod types;
pub mod workflow;

#[cfg(test)]
mod test_support;

pub use state::AppState;
pub use types::OutreachForm;
pub use workflow::{DraftError, DraftErrorKind, DraftOutcome, DraftWorkflow, Stage};

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!(
        "Starting server on http://{} (generation enabled: {})",
        bind_addr,
        state.workflow.generation_enabled()
    );

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
