use std::{path::Path, sync::mpsc};

use tokio::runtime::{Builder, Runtime};

use crate::{
    infra::{self, error::AppError, storage_layout::StorageLayout},
    transport::{RestClient, SpawningRestTransport, WsConnector},
    ui::TerminalEventSource,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
        dispatcher::Dispatcher,
        shell::DefaultShellOrchestrator,
    },
};

pub struct ShellComposition {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
}

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config = infra::config::load(config_path)?;
    let layout = StorageLayout::resolve()?;
    let log_guard = infra::logging::init(&config.logging, &layout)?;
    let runtime = build_runtime()?;

    tracing::info!(
        mode = config.transport.mode.as_label(),
        rest_endpoint = %config.transport.rest_endpoint,
        websocket_endpoint = %config.transport.websocket_endpoint,
        rest_fallback = config.transport.rest_fallback,
        "transport configured"
    );

    Ok(AppContext::new(config, layout, runtime, Some(log_guard)))
}

pub fn compose_shell(context: &AppContext) -> Result<ShellComposition, AppError> {
    let transport = &context.config.transport;
    let (events_tx, events_rx) = mpsc::channel();

    let rest = SpawningRestTransport::new(
        RestClient::new(&transport.rest_endpoint)?,
        context.runtime.handle().clone(),
        events_tx.clone(),
    );
    let connector = WsConnector::new(
        transport.websocket_endpoint.clone(),
        context.runtime.handle().clone(),
        events_tx,
    );

    let mut orchestrator =
        DefaultShellOrchestrator::new(Dispatcher::new(transport, rest, connector));
    orchestrator.start();

    Ok(ShellComposition {
        event_source: Box::new(TerminalEventSource::new(events_rx)),
        orchestrator: Box::new(orchestrator),
    })
}

fn build_runtime() -> Result<Runtime, AppError> {
    Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("nebula-transport")
        .enable_all()
        .build()
        .map_err(AppError::RuntimeInit)
}
