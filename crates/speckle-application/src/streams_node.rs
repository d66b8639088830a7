//! The "Speckle Streams" node.
//!
//! Ties session resolution and stream listing to the observable fields a host
//! binds to. Every write to those fields is marshalled onto the UI context.

use crate::session_resolver::SessionResolver;
use crate::stream_lister::{Listing, StreamLister};
use speckle_core::account::Session;
use speckle_core::dispatch::{UiDispatcher, run_on_ui};
use speckle_core::node::{
    GraphHost, NodeDescriptor, NodeMessage, NodeSnapshot, NodeState, OutputValue, PortSpec,
};
use speckle_core::observable::Observable;
use speckle_core::stream::{StreamSummary, StreamsApi};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Name of the node's single output port.
pub const OUTPUT_PORT: &str = "ID";

/// Library metadata for the streams node.
pub const DESCRIPTOR: NodeDescriptor = NodeDescriptor {
    name: "Speckle Streams",
    description: "Lists your existing Speckle streams for a specified account.",
    category: "Speckle.I/O",
    outputs: &[PortSpec {
        name: OUTPUT_PORT,
        type_name: "string",
        description: "Stream ID",
    }],
};

/// Collaborators shared by every streams node of a host.
#[derive(Clone)]
pub struct NodeServices {
    pub resolver: SessionResolver,
    pub lister: StreamLister,
    pub ui: Arc<dyn UiDispatcher>,
    pub host: Arc<dyn GraphHost>,
}

/// Observable fields of one node.
#[derive(Debug, Default)]
pub struct NodeOutputs {
    /// Streams offered to the user, in service order
    pub streams: Observable<Vec<StreamSummary>>,
    /// True while a listing attempt is in progress
    pub transmitting: Observable<bool>,
    pub state: Observable<NodeState>,
    /// Error and warning annotations
    pub messages: Observable<Vec<NodeMessage>>,
    pub rest_api: Observable<Option<String>>,
    pub email: Observable<Option<String>>,
    pub server: Observable<Option<String>>,
    /// The stream id emitted downstream
    pub stream_id: Observable<Option<String>>,
    disposed: AtomicBool,
}

impl NodeOutputs {
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn finish(&self, state: NodeState) {
        self.transmitting.set(false);
        self.state.set(state);
    }
}

/// A streams node instance.
pub struct StreamsNode {
    id: Uuid,
    outputs: Arc<NodeOutputs>,
    session: Mutex<Option<Session>>,
    client: Mutex<Option<Arc<dyn StreamsApi>>>,
    services: NodeServices,
}

impl StreamsNode {
    /// Creates a fresh, unbound node.
    pub fn new(services: NodeServices) -> Self {
        Self {
            id: Uuid::new_v4(),
            outputs: Arc::new(NodeOutputs::default()),
            session: Mutex::new(None),
            client: Mutex::new(None),
            services,
        }
    }

    /// Recreates a node from saved state.
    ///
    /// When the snapshot carries a token and endpoint, attaching reuses them
    /// without prompting for an account.
    pub fn restore(snapshot: NodeSnapshot, services: NodeServices) -> Self {
        let outputs = NodeOutputs::default();
        outputs.rest_api.set(snapshot.rest_api.clone());
        outputs.email.set(snapshot.email.clone());
        outputs.server.set(snapshot.server.clone());
        outputs.stream_id.set(snapshot.stream_id.clone());

        Self {
            id: snapshot.node_id,
            session: Mutex::new(snapshot.session()),
            outputs: Arc::new(outputs),
            client: Mutex::new(None),
            services,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn outputs(&self) -> &NodeOutputs {
        &self.outputs
    }

    /// The session currently bound to this node.
    pub fn session(&self) -> Option<Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Runs the attach lifecycle once and returns the state it settled in.
    ///
    /// Resolves a session, then serves the stream list from the shared cache
    /// or fetches it. Failures end up as node annotations, never as errors.
    pub async fn attach(&self) -> NodeState {
        let existing = self.session();
        self.publish(|outputs| {
            outputs.transmitting.set(true);
            outputs.state.set(NodeState::Resolving);
        })
        .await;

        let session = match self.services.resolver.resolve(existing).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(node_id = %self.id, error = %e, "Session resolution failed");
                let message = NodeMessage::error(e.to_string());
                self.publish(move |outputs| {
                    outputs.messages.update(|messages| messages.push(message));
                    outputs.finish(NodeState::Failed);
                })
                .await;
                return NodeState::Failed;
            }
        };

        self.bind(&session).await;

        let listing = self
            .services
            .lister
            .list_streams_with(&session, move |client| async move {
                self.hold_client(client);
                self.publish(|outputs| outputs.state.set(NodeState::Fetching))
                    .await;
            })
            .await;

        match listing {
            Listing::Cached(streams) => {
                self.publish(move |outputs| {
                    outputs.state.set(NodeState::Cached);
                    outputs.streams.set(streams.to_vec());
                    outputs.finish(NodeState::Idle);
                })
                .await;
                NodeState::Idle
            }
            Listing::Fetched(streams) => {
                tracing::debug!(node_id = %self.id, count = streams.len(), "Publishing streams");
                self.publish(move |outputs| {
                    outputs.streams.set(streams.to_vec());
                    outputs.finish(NodeState::Idle);
                })
                .await;
                NodeState::Idle
            }
            Listing::Failed(e) => {
                let message = NodeMessage::warning(e.to_string());
                self.publish(move |outputs| {
                    outputs.messages.update(|messages| messages.push(message));
                    outputs.finish(NodeState::Stale);
                })
                .await;
                NodeState::Stale
            }
        }
    }

    /// Runs [`StreamsNode::attach`] on the runtime, for hosts whose
    /// "added to graph" hook cannot await.
    pub fn attach_in_background(self: &Arc<Self>) -> JoinHandle<NodeState> {
        let node = self.clone();
        tokio::spawn(async move { node.attach().await })
    }

    /// Sets the stream id emitted downstream and asks the host to re-evaluate.
    ///
    /// Does not re-run the listing. An empty id clears the selection.
    pub async fn set_stream_id(&self, stream_id: impl Into<String>) {
        let stream_id = stream_id.into();
        let value = (!stream_id.is_empty()).then_some(stream_id);
        self.publish(move |outputs| outputs.stream_id.set(value))
            .await;
        self.services.host.request_reevaluation(self.id);
    }

    /// Builds the value for the output port.
    ///
    /// Clears annotations, like every evaluation pass. Emits nothing while no
    /// stream is selected.
    pub async fn build_output(&self) -> Option<OutputValue> {
        self.publish(|outputs| {
            outputs.messages.set_if_changed(Vec::new());
        })
        .await;
        let stream_id = self.outputs.stream_id.get()?;
        Some(OutputValue {
            port: OUTPUT_PORT.to_string(),
            value: stream_id,
        })
    }

    /// Captures the state to persist with the graph.
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            node_id: self.id,
            rest_api: self.outputs.rest_api.get(),
            email: self.outputs.email.get(),
            server: self.outputs.server.get(),
            auth_token: self.session().map(|s| s.auth_token),
            stream_id: self.outputs.stream_id.get(),
        }
    }

    /// Releases the held API client and detaches the outputs.
    ///
    /// An in-flight fetch keeps its own client handle and still completes (and
    /// still updates the shared cache); its results are dropped.
    pub fn dispose(&self) {
        if self.outputs.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        let client = self
            .client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        tracing::debug!(node_id = %self.id, released_client = client.is_some(), "Node disposed");
    }

    /// Stores the session and mirrors its fields into the observables.
    async fn bind(&self, session: &Session) {
        *self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session.clone());

        let session = session.clone();
        self.publish(move |outputs| {
            outputs.rest_api.set_if_changed(Some(session.endpoint_url));
            outputs.email.set_if_changed(Some(session.account_email));
            outputs.server.set_if_changed(Some(session.server_name));
        })
        .await;
    }

    fn hold_client(&self, client: Arc<dyn StreamsApi>) {
        if self.outputs.is_disposed() {
            return;
        }
        *self
            .client
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(client);
    }

    /// Applies `update` to the outputs on the UI context.
    ///
    /// Skipped when the node has been disposed or dropped in the meantime.
    async fn publish<F>(&self, update: F)
    where
        F: FnOnce(&NodeOutputs) + Send + 'static,
    {
        let target: Weak<NodeOutputs> = Arc::downgrade(&self.outputs);
        let result = run_on_ui(self.services.ui.as_ref(), move || match target.upgrade() {
            Some(outputs) if !outputs.is_disposed() => update(outputs.as_ref()),
            _ => tracing::debug!("Node gone, dropping update"),
        })
        .await;

        if let Err(e) = result {
            tracing::warn!(node_id = %self.id, error = %e, "Could not publish node update");
        }
    }
}

impl Drop for StreamsNode {
    fn drop(&mut self) {
        self.dispose();
    }
}
