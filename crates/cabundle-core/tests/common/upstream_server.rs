//! Minimal HTTP/1.1 server standing in for the upstream CA endpoints.
//!
//! Serves `/cacert.pem.sha256` and `/cacert.pem` with a fixed
//! `Last-Modified`, answers HEAD without a body, and exposes a redirect
//! chain under `/hop/N` that lands on `/cacert.pem` after N+1 redirects.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

pub const LAST_MODIFIED: &str = "Tue, 14 Nov 2023 22:13:20 GMT";
pub const LAST_MODIFIED_EPOCH: u64 = 1_700_000_000;

#[derive(Debug, Clone)]
pub struct Upstream {
    /// e.g. "http://127.0.0.1:12345"
    pub base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Request lines seen so far, e.g. "HEAD /cacert.pem".
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

struct Content {
    checksum: Vec<u8>,
    bundle: Vec<u8>,
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(checksum: Vec<u8>, bundle: Vec<u8>) -> Upstream {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let content = Arc::new(Content { checksum, bundle });
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let content = Arc::clone(&content);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &content, &log));
        }
    });
    Upstream {
        base: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(mut stream: TcpStream, content: &Content, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();
    log.lock().unwrap().push(format!("{} {}", method, path));

    if let Some(hops) = path.strip_prefix("/hop/") {
        let next = match hops.parse::<u32>() {
            Ok(0) => "/cacert.pem".to_string(),
            Ok(n) => format!("/hop/{}", n - 1),
            Err(_) => return not_found(&mut stream),
        };
        let response = format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            next
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    let body: &[u8] = match path.as_str() {
        "/cacert.pem.sha256" => &content.checksum,
        "/cacert.pem" => &content.bundle,
        _ => return not_found(&mut stream),
    };
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nLast-Modified: {}\r\nConnection: close\r\n\r\n",
        body.len(),
        LAST_MODIFIED
    );
    let _ = stream.write_all(response.as_bytes());
    if !method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(body);
    }
}

fn not_found(stream: &mut TcpStream) {
    let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
}
