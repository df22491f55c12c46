//! Routing fallbacks, CORS, health probes, and round trips over a real socket.

mod support;

use std::time::Duration;

use bytes::Bytes;
use catalog::Server;
use catalog::store::CatalogStore;
use support::{app, send};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

fn request(method: &str, uri: &str) -> http::Request<Bytes> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::new())
        .unwrap()
}

#[tokio::test]
async fn unknown_route_is_404_json() {
    let (_, app) = app();
    let (status, body) = send(&app, "GET", "/orders", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "not found");
}

#[tokio::test]
async fn unregistered_method_on_known_path_is_404() {
    let (_, app) = app();
    let (status, _) = send(&app, "PATCH", "/categories/1", None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn responses_allow_any_origin() {
    let (_, app) = app();
    let res = app.dispatch(request("GET", "/categories")).await;
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn preflight_is_answered_without_a_handler() {
    let (_, app) = app();
    let res = app.dispatch(request("OPTIONS", "/products/3")).await;
    assert_eq!(res.status_code(), 204);
    assert!(res.header("access-control-allow-methods").unwrap().contains("PUT"));
    assert_eq!(res.header("access-control-allow-headers"), Some("content-type"));
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn preflight_allows_the_requested_headers() {
    let (_, app) = app();
    let req = http::Request::builder()
        .method("OPTIONS")
        .uri("/categories")
        .header("origin", "http://localhost:8080")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "authorization, x-requested-with")
        .body(Bytes::new())
        .unwrap();

    let res = app.dispatch(req).await;
    assert_eq!(res.status_code(), 204);
    assert_eq!(res.header("access-control-allow-headers"), Some("authorization, x-requested-with"));
}

#[tokio::test]
async fn cors_can_be_disabled() {
    let store = std::sync::Arc::new(catalog::store::MemoryStore::new());
    let app = catalog::routes::router(store).cors(false);

    let res = app.dispatch(request("GET", "/categories")).await;
    assert_eq!(res.header("access-control-allow-origin"), None);
    assert_eq!(app.dispatch(request("OPTIONS", "/categories")).await.status_code(), 404);
}

#[tokio::test]
async fn health_probes_follow_the_store() {
    let (store, app) = app();

    let live = app.dispatch(request("GET", "/healthz")).await;
    assert_eq!((live.status_code(), live.body()), (200, &b"ok"[..]));

    let ready = app.dispatch(request("GET", "/readyz")).await;
    assert_eq!((ready.status_code(), ready.body()), (200, &b"ready"[..]));

    store.set_unavailable(true);
    assert_eq!(app.dispatch(request("GET", "/readyz")).await.status_code(), 503);
    assert_eq!(app.dispatch(request("GET", "/healthz")).await.status_code(), 200);
}

#[tokio::test]
async fn serves_over_tcp_and_shuts_down() {
    let (_, app) = app();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();

    let server = tokio::spawn(
        Server::from_listener(listener).serve_with_shutdown(app, async {
            let _ = stopped.await;
        }),
    );

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            b"POST /categories HTTP/1.1\r\nhost: test\r\ncontent-type: application/json\r\n\
              content-length: 15\r\nconnection: close\r\n\r\n{\"name\":\"Toys\"}",
        )
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 200"), "unexpected response: {raw}");
    assert!(raw.ends_with(r#"{"id":1,"name":"Toys"}"#), "unexpected body: {raw}");

    stop.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server drains and stops")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn oversized_body_is_413_over_tcp() {
    let (store, app) = app();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();

    let server = tokio::spawn(Server::from_listener(listener).max_body_bytes(1024).serve_with_shutdown(
        app,
        async {
            let _ = stopped.await;
        },
    ));

    let name = "x".repeat(2048);
    let body = format!(r#"{{"name":"{name}"}}"#);
    let head = format!(
        "POST /categories HTTP/1.1\r\nhost: test\r\ncontent-type: application/json\r\n\
         content-length: {}\r\nconnection: close\r\n\r\n",
        body.len()
    );

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(format!("{head}{body}").as_bytes()).await.unwrap();

    // The server may reset the socket after answering without draining the
    // body; keep whatever arrived before that.
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
        }
    }
    let raw = String::from_utf8_lossy(&raw);

    assert!(raw.starts_with("HTTP/1.1 413"), "unexpected response: {raw}");
    assert!(raw.ends_with(r#"{"error":"request body exceeds 1024 bytes"}"#), "unexpected body: {raw}");
    assert!(store.list_categories().await.unwrap().is_empty());

    stop.send(()).unwrap();
    tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server drains and stops")
        .unwrap()
        .unwrap();
}
