//! Local HTTP stub for exercising provider transports.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};

/// A request as seen by the stub server.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: String,
}

pub(crate) type Requests = Arc<Mutex<Vec<RecordedRequest>>>;

/// Serve `body` with `status` for every request on an ephemeral port.
///
/// Returns the base URL (`http://127.0.0.1:N`) and the recorded requests.
pub(crate) async fn stub_server(status: StatusCode, body: &'static str) -> (String, Requests) {
    let requests: Requests = Arc::default();
    let seen = requests.clone();

    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, bytes: Bytes| {
            let seen = seen.clone();
            async move {
                seen.lock().unwrap().push(RecordedRequest {
                    method,
                    uri,
                    headers,
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                });
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        },
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), requests)
}

/// A base URL nothing is listening on.
pub(crate) async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
