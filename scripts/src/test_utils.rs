//! Fixtures shared by the unit tests

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

/// Lay out a hardhat artifacts directory with one contract
pub fn write_artifacts(dir: &Path, bytecode: &str) -> PathBuf {
    let contract_dir = dir.join("contracts").join("BFMTokenPresale.sol");
    let build_info_dir = dir.join("build-info");
    fs::create_dir_all(&contract_dir).unwrap();
    fs::create_dir_all(&build_info_dir).unwrap();

    let artifact_path = contract_dir.join("BFMTokenPresale.json");
    fs::write(
        &artifact_path,
        format!(
            r#"{{
                "contractName": "BFMTokenPresale",
                "sourceName": "contracts/BFMTokenPresale.sol",
                "abi": [],
                "bytecode": "{bytecode}"
            }}"#
        ),
    )
    .unwrap();
    fs::write(
        contract_dir.join("BFMTokenPresale.dbg.json"),
        r#"{"_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/abc123.json"}"#,
    )
    .unwrap();
    fs::write(
        build_info_dir.join("abc123.json"),
        r#"{
            "solcVersion": "0.8.20",
            "solcLongVersion": "0.8.20+commit.a1b79de6",
            "input": {"language": "Solidity", "sources": {}}
        }"#,
    )
    .unwrap();

    artifact_path
}

/// A local HTTP server answering each connection with the next canned response
pub struct CannedServer {
    /// Base URL of the server
    pub url: String,
    /// Request lines received so far, e.g. `GET /api?... HTTP/1.1`
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    /// Serve the given `(status, body)` responses, in order, one per connection
    pub async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = requests.clone();
        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                let request_line = read_request(&mut stream).await;
                seen.lock().unwrap().push(request_line);

                let response = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.ok();
            }
        });

        Self { url, requests }
    }

    /// Number of requests served
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Read a full HTTP request, returning its request line
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
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
