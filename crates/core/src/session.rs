//! Single-writer event loop that owns the [`Viewer`].
//!
//! Hover events and queries are queued on a channel and handled one at a
//! time by a single task, so each transition and its recomposition complete
//! before the next event is looked at.

use crate::error::{CityError, CityResult};
use crate::loader::{load_snapshot, DocumentSource, LoadOptions};
use crate::viewer::Viewer;
use citysheet_dag::EdgeKey;
use citysheet_viz::{AnimationPhase, HoverEvent, Layer};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

const COMMAND_BUFFER: usize = 64;

/// Session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Delay between the first frame and the tower rise.
    pub animation_delay: Duration,
    pub load: LoadOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            animation_delay: Duration::from_millis(1000),
            load: LoadOptions::default(),
        }
    }
}

enum Command {
    Hover(HoverEvent, oneshot::Sender<Arc<Vec<Layer>>>),
    Layers(oneshot::Sender<Arc<Vec<Layer>>>),
    Highlighted(oneshot::Sender<Vec<EdgeKey>>),
    Phase(oneshot::Sender<AnimationPhase>),
}

/// Entry points for starting a session.
pub struct Session;

impl Session {
    /// Load the document and start the session loop.
    ///
    /// Any load failure aborts before anything is composed.
    pub async fn start(
        source: &DocumentSource,
        config: SessionConfig,
    ) -> CityResult<SessionHandle> {
        let snapshot = match load_snapshot(source, &config.load).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(%source, error = %e, "initialization aborted");
                return Err(e);
            }
        };
        Ok(Self::spawn(Viewer::new(snapshot), config.animation_delay))
    }

    /// Start the loop for an already composed viewer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(viewer: Viewer, animation_delay: Duration) -> SessionHandle {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        tokio::spawn(run(viewer, rx, animation_delay));
        tracing::info!(delay_ms = animation_delay.as_millis() as u64, "session started");
        SessionHandle { tx }
    }
}

async fn run(mut viewer: Viewer, mut rx: mpsc::Receiver<Command>, animation_delay: Duration) {
    let rise = tokio::time::sleep(animation_delay);
    tokio::pin!(rise);
    let mut armed = true;

    loop {
        tokio::select! {
            () = &mut rise, if armed => {
                armed = false;
                viewer.finish_animation();
            }
            command = rx.recv() => {
                let Some(command) = command else {
                    break;
                };
                handle(&mut viewer, command);
            }
        }
    }
    tracing::debug!("session loop stopped");
}

// A dropped reply receiver only means the caller went away.
fn handle(viewer: &mut Viewer, command: Command) {
    match command {
        Command::Hover(event, reply) => {
            viewer.handle_hover(event);
            let _ = reply.send(viewer.layers());
        }
        Command::Layers(reply) => {
            let _ = reply.send(viewer.layers());
        }
        Command::Highlighted(reply) => {
            let _ = reply.send(viewer.highlighted());
        }
        Command::Phase(reply) => {
            let _ = reply.send(viewer.phase());
        }
    }
}

/// Cloneable handle to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    /// Apply a hover event and return the layers composed after it.
    pub async fn hover(&self, event: HoverEvent) -> CityResult<Arc<Vec<Layer>>> {
        self.request(|reply| Command::Hover(event, reply)).await
    }

    /// Current layer list.
    pub async fn layers(&self) -> CityResult<Arc<Vec<Layer>>> {
        self.request(Command::Layers).await
    }

    /// Currently highlighted edges.
    pub async fn highlighted(&self) -> CityResult<Vec<EdgeKey>> {
        self.request(Command::Highlighted).await
    }

    pub async fn phase(&self) -> CityResult<AnimationPhase> {
        self.request(Command::Phase).await
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> CityResult<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| CityError::SessionClosed)?;
        response.await.map_err(|_| CityError::SessionClosed)
    }
}
