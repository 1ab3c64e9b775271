//! Common test utilities and helpers

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// Minimal HTTP/1.1 server answering GET requests from a fixed path table.
///
/// Unknown paths get a 404. Each connection serves one request.
pub struct DocumentServer {
    addr: SocketAddr,
}

impl DocumentServer {
    pub async fn start(documents: HashMap<String, String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        let documents = Arc::new(documents);

        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let documents = documents.clone();
                tokio::spawn(async move {
                    let (read, mut write) = socket.into_split();
                    let mut lines = BufReader::new(read).lines();

                    let path = match lines.next_line().await {
                        Ok(Some(request_line)) => request_line
                            .split_whitespace()
                            .nth(1)
                            .unwrap_or("/")
                            .to_string(),
                        _ => return,
                    };
                    // Drain headers up to the blank line.
                    while let Ok(Some(line)) = lines.next_line().await {
                        if line.is_empty() {
                            break;
                        }
                    }

                    let response = match documents.get(&path) {
                        Some(body) => format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        ),
                        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                            .to_string(),
                    };
                    let _ = write.write_all(response.as_bytes()).await;
                    let _ = write.shutdown().await;
                });
            }
        });

        Self { addr }
    }

    /// URL prefix such that `prefix + n + ".txt"` addresses `/doc{n}.txt`.
    pub fn url_prefix(&self) -> String {
        format!("http://{}/doc", self.addr)
    }
}
