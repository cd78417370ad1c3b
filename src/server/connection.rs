// Connection handling module
// Serves one accepted TCP connection with hyper

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Spawn a task serving HTTP/1.1 (with keep-alive) on `stream`.
///
/// The task ends when the client closes the connection or the runtime shuts
/// down; nothing waits for it.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
) {
    let state = Arc::clone(state);
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req: Request<Incoming>| {
            handler::handle_request(req, Arc::clone(&state), peer_addr)
        });

        if let Err(err) = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service)
            .await
        {
            // Clients dropping idle keep-alive connections is routine
            if !err.is_incomplete_message() {
                logger::log_connection_error(&err);
            }
        }
    });
}
