//! Shared fixtures for the integration and unit suites.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread;

use shrike::{classify_index, BackendSet, RawIndexItem};

pub fn item(name: &str, heading: &str) -> RawIndexItem {
    RawIndexItem {
        name: Some(name.to_string()),
        heading: Some(heading.to_string()),
    }
}

/// A small but representative index: functions, a method, a class, and a
/// general page.
pub fn sample_index_json() -> String {
    r#"[
        ["strlen", "function.strlen"],
        ["str_replace", "function.str-replace"],
        ["DateTime::format", "datetime.format"],
        ["DateTime", "class.datetime"],
        ["Installation", "install.general"]
    ]"#
    .to_string()
}

pub fn sample_description_json() -> String {
    r#"{
        "function.strlen": "Get string length",
        "class.datetime": "Representation of date and time",
        "book.nowhere": "References a page outside the index"
    }"#
    .to_string()
}

pub fn sample_backend_set() -> BackendSet {
    let items: Vec<RawIndexItem> =
        serde_json::from_str(&sample_index_json()).expect("fixture parses");
    classify_index(&items)
}

/// Minimal loopback HTTP server: answers each connection from a fixed
/// path → (status, body) table, 404 for anything else. Serves until the
/// test process exits.
pub fn spawn_manual_server(routes: HashMap<String, (u16, String)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };

            let mut buf = [0u8; 8192];
            let n = stream.read(&mut buf).unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let path = request
                .lines()
                .next()
                .and_then(|line| line.split(' ').nth(1))
                .unwrap_or("/")
                .to_string();

            let (status, body) = routes
                .get(&path)
                .cloned()
                .unwrap_or((404, "not found".to_string()));
            let reason = if status == 200 { "OK" } else { "Not Found" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    addr
}

/// Routes serving a complete manual (index + descriptions) for `language`.
pub fn manual_routes(language: &str) -> HashMap<String, (u16, String)> {
    HashMap::from([
        (
            format!("/manual/{language}/search-index.json"),
            (200, sample_index_json()),
        ),
        (
            format!("/manual/{language}/search-description.json"),
            (200, sample_description_json()),
        ),
    ])
}
