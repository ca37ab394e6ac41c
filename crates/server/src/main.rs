use std::net::SocketAddr;
use std::sync::Arc;

use cardscan_ocr::{ExtractionPipeline, TesseractRecognizer};
use tracing_subscriber::EnvFilter;

mod routes;

pub struct AppState {
    pub pipeline: ExtractionPipeline<TesseractRecognizer>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Tesseract finds its language data via TESSDATA_PREFIX by default;
    // CARDSCAN_TESSDATA overrides it for this process only.
    let recognizer = TesseractRecognizer::new(std::env::var("CARDSCAN_TESSDATA").ok());
    let state = Arc::new(AppState {
        pipeline: ExtractionPipeline::new(recognizer),
    });

    let addr: SocketAddr = std::env::var("CARDSCAN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".into())
        .parse()?;

    let app = routes::router(state);
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
