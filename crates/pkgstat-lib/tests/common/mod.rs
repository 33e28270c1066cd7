//! In-process HTTP responder for download tests.

#![allow(dead_code, unreachable_pub)]

use flate2::Compression;
use flate2::write::GzEncoder;
use pkgstat_lib::ProgressSink;
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
    /// Announced length when it should differ from the body length.
    pub content_length: Option<usize>,
    /// Pause before each body piece; the body is sent in `pieces` writes.
    pub pace: Option<(usize, Duration)>,
}

impl Reply {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            body,
            content_length: None,
            pace: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: b"error".to_vec(),
            content_length: None,
            pace: None,
        }
    }

    /// A 200 response that announces more bytes than it sends.
    pub fn truncated(body: Vec<u8>) -> Self {
        let announced = body.len() * 2 + 1;
        Self {
            status: 200,
            body,
            content_length: Some(announced),
            pace: None,
        }
    }

    /// A 200 response whose body trickles out in `pieces` writes.
    pub fn paced(body: Vec<u8>, pieces: usize, delay: Duration) -> Self {
        Self {
            pace: Some((pieces, delay)),
            ..Self::ok(body)
        }
    }
}

/// Serves the n-th reply to the n-th connection, repeating the last one.
pub struct TestServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let task = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let reply = replies[n.min(replies.len() - 1)].clone();
                tokio::spawn(serve(socket, reply));
            }
        });

        Self { addr, hits, task }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(mut socket: TcpStream, reply: Reply) {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }
    }

    let reason = match reply.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    };
    let length = reply.content_length.unwrap_or(reply.body.len());
    let head = format!(
        "HTTP/1.1 {} {reason}\r\nContent-Type: application/gzip\r\nContent-Length: {length}\r\nConnection: close\r\n\r\n",
        reply.status
    );

    let _ = socket.write_all(head.as_bytes()).await;
    match reply.pace {
        Some((pieces, delay)) => {
            let size = reply.body.len().div_ceil(pieces.max(1)).max(1);
            for piece in reply.body.chunks(size) {
                tokio::time::sleep(delay).await;
                if socket.write_all(piece).await.is_err() {
                    return;
                }
                let _ = socket.flush().await;
            }
        }
        None => {
            let _ = socket.write_all(&reply.body).await;
        }
    }
    let _ = socket.shutdown().await;
}

pub fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

/// Temporary files left behind whose names start with `prefix`.
pub fn leftover_temp_files(prefix: &str) -> Vec<PathBuf> {
    std::fs::read_dir(std::env::temp_dir())
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with(prefix))
        })
        .collect()
}

/// Progress sink that records every update.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub starts: Mutex<Vec<Option<u64>>>,
    pub updates: Mutex<Vec<(u64, Option<u64>)>>,
    pub finished: AtomicUsize,
}

impl ProgressSink for RecordingProgress {
    fn start(&self, total: Option<u64>) {
        self.starts.lock().unwrap().push(total);
        self.updates.lock().unwrap().clear();
    }

    fn advance(&self, transferred: u64, total: Option<u64>) {
        self.updates.lock().unwrap().push((transferred, total));
    }

    fn finish(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}
