// src/commands/serve_cmd.rs

use sailwatch::config::CONFIG;
use sailwatch::{create_app, create_app_state};
use std::error::Error;
use tracing::info;

pub async fn execute(host: String, port: u16) -> Result<(), Box<dyn Error>> {
    let app_state = create_app_state(&CONFIG).await?;
    let app = create_app(app_state).await;

    // Run it
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
