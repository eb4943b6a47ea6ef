//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Server assembly: listener, accept loop and wiring.

use crate::config::ServerConfig;
use crate::dispatcher::TickDispatcher;
use crate::session;
use crate::types::PlayerInput;
use runemud_world::{PlayerId, World};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{Notify, mpsc, watch};
use tracing::{Instrument, error, info, info_span, warn};

/// Requests a graceful shutdown of a running [`MudServer`], equivalent to
/// sending the process SIGTERM.
#[derive(Clone)]
pub struct ShutdownHandle {
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    /// Request shutdown. Idempotent.
    pub fn shutdown(&self) {
        self.notify.notify_one();
    }
}

/// The RuneMUD server: a bound listener plus the world it will host.
///
/// # Example
///
/// ```no_run
/// use runemud_server::{MudServer, ServerConfig};
/// use runemud_world::World;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut world = World::new();
///     world.add_room("The Landing", "A quiet stone platform.");
///
///     let server = MudServer::bind(ServerConfig::default(), world).await?;
///     server.run().await;
///     Ok(())
/// }
/// ```
pub struct MudServer {
    config: ServerConfig,
    world: World,
    listener: TcpListener,
    shutdown: Arc<Notify>,
}

impl MudServer {
    /// Bind the listener. The server does not accept connections until
    /// [`MudServer::run`].
    pub async fn bind(config: ServerConfig, world: World) -> std::io::Result<MudServer> {
        let listener = TcpListener::bind(config.bind_address).await?;
        info!(address = %listener.local_addr()?, "server bound");
        Ok(MudServer {
            config,
            world,
            listener,
            shutdown: Arc::new(Notify::new()),
        })
    }

    /// The actual bound address (useful with port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// A handle that can request shutdown from anywhere.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            notify: self.shutdown.clone(),
        }
    }

    /// Accept connections and run the tick loop until SIGINT/SIGTERM or the
    /// shutdown handle fires, then tear down gracefully.
    pub async fn run(self) {
        let inbound_capacity =
            (self.config.max_players * self.config.max_player_input_queue).max(1);
        let (inbound_tx, inbound_rx) = mpsc::channel::<PlayerInput>(inbound_capacity);
        let (stop_tx, stop_rx) = watch::channel(false);
        let (done_tx, done_rx) = mpsc::channel::<()>(1);
        let (listener_error_tx, listener_error_rx) = mpsc::channel::<std::io::Error>(1);

        spawn_signal_listener(self.shutdown.clone());

        tokio::spawn(accept_loop(
            self.listener,
            inbound_tx,
            stop_rx,
            done_tx,
            listener_error_tx,
        ));

        let dispatcher = TickDispatcher::new(self.world, &self.config, inbound_rx);
        dispatcher
            .run(self.shutdown, listener_error_rx, stop_tx, done_rx)
            .await;
        info!("server stopped");
    }
}

/// Accept connections and spawn one session task each until stopped.
///
/// Dropping the listener on the way out closes the listening socket.
async fn accept_loop(
    listener: TcpListener,
    inbound: mpsc::Sender<PlayerInput>,
    mut stop: watch::Receiver<bool>,
    done: mpsc::Sender<()>,
    listener_error: mpsc::Sender<std::io::Error>,
) {
    let mut next_player_id: u64 = 1;
    loop {
        tokio::select! {
            result = listener.accept() => match result {
                Ok((socket, peer_addr)) => {
                    let player = PlayerId::new(next_player_id);
                    next_player_id += 1;
                    info!(%peer_addr, %player, "connection accepted");

                    let session_inbound = inbound.clone();
                    let session_stop = stop.clone();
                    let session_done = done.clone();
                    tokio::spawn(
                        async move {
                            // Held until the session ends; the dispatcher
                            // joins on the channel closing.
                            let _guard = session_done;
                            session::handle_connection(
                                socket,
                                player,
                                session_inbound,
                                session_stop,
                            )
                            .await;
                        }
                        .instrument(info_span!("session", %player)),
                    );
                }
                Err(err) => {
                    error!(%err, "listener accept failed");
                    let _ = listener_error.send(err).await;
                    return;
                }
            },
            _ = stop.changed() => {
                info!("listener stopping");
                return;
            }
        }
    }
}

/// Forward SIGINT and, on Unix, SIGTERM to the shutdown notifier.
fn spawn_signal_listener(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut terminate) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {}
                        _ = terminate.recv() => {}
                    }
                }
                Err(err) => {
                    warn!(%err, "failed to install SIGTERM handler");
                    let _ = tokio::signal::ctrl_c().await;
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }
        info!("shutdown signal received");
        shutdown.notify_one();
    });
}
