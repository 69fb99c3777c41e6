// Bus surface: the dispatcher's methods as HTTP/1 endpoints on a Unix socket

mod http;
mod rpc;

use axum::{
    Router,
    routing::{get, post},
};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::net::UnixListener;

use crate::config::AppConfig;
use crate::dispatcher::Dispatcher;

#[derive(Clone)]
pub(crate) struct AppState {
    /// One dispatcher, one request at a time.
    pub(crate) dispatcher: Arc<Mutex<Dispatcher>>,
    pub(crate) config: AppConfig,
}

pub fn app(dispatcher: Arc<Mutex<Dispatcher>>, config: AppConfig) -> Router {
    let state = AppState { dispatcher, config };
    Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/{object}", get(http::list_handler)) // GET /ubm
        .route("/{object}/{method}", post(rpc::call_handler)) // POST /ubm/<method>
        .with_state(state)
}

/// Attaches to the bus: binds the Unix socket, replacing a stale socket file.
///
/// A socket that still accepts connections belongs to a running instance and
/// fails with `AddrInUse`.
pub fn bind(socket_path: impl AsRef<Path>) -> io::Result<UnixListener> {
    use std::os::unix::fs::FileTypeExt;

    let path = socket_path.as_ref();
    if let Ok(meta) = std::fs::symlink_metadata(path)
        && meta.file_type().is_socket()
    {
        match std::os::unix::net::UnixStream::connect(path) {
            Ok(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::AddrInUse,
                    format!("{} is served by a running instance", path.display()),
                ));
            }
            Err(e) if e.kind() == io::ErrorKind::ConnectionRefused => {
                std::fs::remove_file(path)?;
                tracing::debug!(path = %path.display(), "removed stale bus socket");
            }
            // Left in place; the bind below reports the conflict.
            Err(e) => {
                tracing::debug!(error = %e, path = %path.display(), "bus socket check failed");
            }
        }
    }
    UnixListener::bind(path)
}
