use anyhow::{Context, Result, bail};
use colored::Colorize;
use speckle_application::{NodeServices, SessionResolver, StreamCache, StreamLister, StreamsNode, UiThread};
use speckle_core::dispatch::UiDispatcher;
use speckle_core::node::{DetachedHost, NodeState};
use speckle_infrastructure::{ConfigService, JsonAccountStore, NodeSnapshotStorage};
use speckle_interaction::HttpStreamsApiFactory;
use std::path::PathBuf;
use std::sync::Arc;

use crate::picker::TerminalPicker;

pub struct StreamsArgs {
    pub state: Option<PathBuf>,
    pub save: bool,
    pub select: Option<String>,
    pub json: bool,
}

/// Attaches a streams node and prints what it lists.
pub async fn run(args: StreamsArgs) -> Result<()> {
    let config = ConfigService::new_default()?.get_config()?;

    let ui: Arc<dyn UiDispatcher> = Arc::new(UiThread::spawn("speckle-ui")?);
    let factory = HttpStreamsApiFactory::new(config.streams.request_timeout())
        .with_rest_api_override(config.server.rest_api_override.clone());
    let services = NodeServices {
        resolver: SessionResolver::new(
            Arc::new(JsonAccountStore::new_default()?),
            Arc::new(TerminalPicker::stdio()),
            ui.clone(),
        ),
        lister: StreamLister::new(
            StreamCache::shared(),
            Arc::new(factory),
            config.streams.freshness_window(),
        ),
        ui,
        host: Arc::new(DetachedHost),
    };

    let node = match args.state.as_deref().filter(|p| p.exists()) {
        Some(path) => {
            let snapshot = NodeSnapshotStorage::load_from(path)
                .await
                .with_context(|| format!("Failed to load node state from {}", path.display()))?;
            tracing::info!(node_id = %snapshot.node_id, "Restoring node");
            StreamsNode::restore(snapshot, services)
        }
        None => StreamsNode::new(services),
    };

    let state = node.attach().await;
    let outputs = node.outputs();

    for message in outputs.messages.get() {
        eprintln!("{}", message.to_string().yellow());
    }
    if state == NodeState::Failed {
        bail!("No account resolved; nothing to list");
    }

    let streams = outputs.streams.get();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&streams)?);
    } else {
        let server = outputs.server.get().unwrap_or_default();
        println!("{} streams on {}", streams.len(), server.bold());
        for stream in &streams {
            println!("  {}  {}", stream.stream_id.cyan(), stream.display_name());
        }
    }

    if let Some(stream_id) = args.select {
        if !streams.iter().any(|s| s.stream_id == stream_id) {
            tracing::warn!(stream_id = %stream_id, "Selected stream is not in the listing");
        }
        node.set_stream_id(stream_id).await;
    }
    if let Some(output) = node.build_output().await {
        eprintln!("{} = {}", output.port, output.value.green());
    }

    if args.save {
        let snapshot = node.snapshot();
        let path = match &args.state {
            Some(path) => {
                NodeSnapshotStorage::save_to(path, &snapshot).await?;
                path.clone()
            }
            None => NodeSnapshotStorage::new_default()?.save(&snapshot).await?,
        };
        eprintln!("Saved node state to {}", path.display());
    }

    node.dispose();
    Ok(())
}
