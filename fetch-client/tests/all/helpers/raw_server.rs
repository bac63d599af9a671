use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Answers every connection with the same raw bytes and remembers the
/// request line it received. Doubles as an HTTP proxy, since proxied
/// requests carry the absolute URL in their request line.
pub struct RawServer {
    addr: SocketAddr,
    request_lines: Arc<Mutex<Vec<String>>>,
}

impl RawServer {
    pub async fn start(raw_http_response: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let request_lines = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&request_lines);
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    continue;
                };
                // 4096 bytes is enough for the request head
                let mut buffer = [0; 4096];
                let read = stream.read(&mut buffer).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buffer[..read]);
                if let Some(line) = request.lines().next() {
                    seen.lock().unwrap().push(line.to_owned());
                }
                let _ = stream.write_all(raw_http_response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self {
            addr,
            request_lines,
        }
    }

    pub fn uri(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.request_lines.lock().unwrap().clone()
    }
}
