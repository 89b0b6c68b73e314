//! Canned-response HTTP server for exercising the API client
//!
//! Serves one queued response per connection and closes it, recording the
//! request line of everything it receives.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A response queued on the stub server
pub(crate) struct StubResponse {
    status: u16,
    headers: Vec<(&'static str, String)>,
    body: String,
}

impl StubResponse {
    /// JSON response with the given status
    pub(crate) fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Add a response header
    pub(crate) fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    fn render(&self) -> String {
        let mut out = format!("HTTP/1.1 {} Stub\r\n", self.status);
        out.push_str("content-type: application/json\r\n");
        out.push_str(&format!("content-length: {}\r\n", self.body.len()));
        out.push_str("connection: close\r\n");
        for (name, value) in &self.headers {
            out.push_str(&format!("{}: {}\r\n", name, value));
        }
        out.push_str("\r\n");
        out.push_str(&self.body);
        out
    }
}

/// Local server answering with queued responses, then 500 once exhausted
pub(crate) struct StubServer {
    /// Base URL, e.g. `http://127.0.0.1:PORT`
    pub(crate) url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Bind an ephemeral port and start serving `responses` in order
    pub(crate) async fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let mut queue: VecDeque<StubResponse> = responses.into();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request_line = read_request(&mut socket).await;
                recorded.lock().unwrap().push(request_line);
                let response = queue.pop_front().unwrap_or_else(|| {
                    StubResponse::json(500, r#"{"message":"no response queued"}"#)
                });
                let _ = socket.write_all(response.render().as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { url, requests }
    }

    /// Request lines received so far, e.g. `GET /path?x=1 HTTP/1.1`
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Read one request (headers plus `content-length` body); returns its request line
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}
