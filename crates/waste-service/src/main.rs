use clap::Parser;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{info, warn};

use waste_service::{handle_request, telemetry, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::parse();
    config.validate()?;
    telemetry::init_tracing(config.log_json, &config.log_filter)?;

    let state = AppState::from_config(&config)?;
    let listener = TcpListener::bind(config.bind).await?;
    info!(
        addr = %config.bind,
        curve = ?config.confidence_curve,
        feature_source = state.classifier.feature_source(),
        assistant = state.assistant.is_some(),
        "waste-service listening"
    );

    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                return Ok(());
            }
        };
        let state = state.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<Incoming>| handle_request(state.clone(), req));
            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                warn!(%peer, error = %e, "connection error");
            }
        });
    }
}
