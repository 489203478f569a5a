// HTTP boundary for the analyzer
//
// A small thread-per-connection server: `GET /` reports service status,
// `POST /analyze` accepts an uploaded source body and returns the analysis
// record together with the rendered diagram and summary text. Input
// validation and parse failures map to client errors; anything unexpected
// maps to an internal error. The core pipeline itself never fails on valid
// trees.

use crate::analysis;
use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::output::diagrams::{render_class_diagram, render_dependency_graph};
use crate::output::summary::render_summary;
use serde_json::json;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Bind and serve until the process is stopped
pub fn serve(config: &ServerConfig) -> Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).map_err(|e| {
        Error::other(format!(
            "Failed to bind to {}:{}: {}",
            config.host, config.port, e
        ))
    })?;

    println!(
        "CodeViz API listening on http://{}:{}",
        config.host, config.port
    );
    println!("Press Ctrl+C to stop");

    serve_on(listener, config.allow_origin.clone())
}

/// Accept connections on an already-bound listener
pub fn serve_on(listener: TcpListener, allow_origin: String) -> Result<()> {
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let allow_origin = allow_origin.clone();
                thread::spawn(move || {
                    if let Err(e) = handle_connection(stream, &allow_origin) {
                        tracing::warn!(error = %e, "connection error");
                    }
                });
            }
            Err(e) => tracing::warn!(error = %e, "accept error"),
        }
    }

    Ok(())
}

/// An HTTP request, read just far enough for routing
struct Request {
    method: String,
    target: String,
    body: Vec<u8>,
}

/// Handle a single connection
fn handle_connection(mut stream: TcpStream, allow_origin: &str) -> Result<()> {
    let request = read_request(&mut stream)?;
    let (path, query) = split_target(&request.target);

    tracing::info!(method = %request.method, path = %path, "request");

    match (request.method.as_str(), path) {
        ("OPTIONS", _) => send_response(&mut stream, 204, None, allow_origin),
        ("GET", "/") => {
            let body = json!({ "status": "CodeViz API is running" });
            send_response(&mut stream, 200, Some(&body), allow_origin)
        }
        ("POST", "/analyze") => {
            let (status, body) = analyze_request(query, &request.body);
            send_response(&mut stream, status, Some(&body), allow_origin)
        }
        _ => {
            let body = json!({ "detail": "Not Found" });
            send_response(&mut stream, 404, Some(&body), allow_origin)
        }
    }
}

/// Run the analysis for an upload, mapping errors to HTTP status codes
fn analyze_request(query: Option<&str>, body: &[u8]) -> (u16, serde_json::Value) {
    match run_analysis(query, body) {
        Ok(value) => (200, value),
        Err(e) => {
            let status = if e.is_client_error() { 400 } else { 500 };
            (status, json!({ "detail": e.to_string() }))
        }
    }
}

fn run_analysis(query: Option<&str>, body: &[u8]) -> Result<serde_json::Value> {
    if let Some(filename) = query.and_then(|q| query_param(q, "filename")) {
        if !filename.ends_with(".py") {
            return Err(Error::invalid_input(format!(
                "unsupported file type: {} (expected a .py file)",
                filename
            )));
        }
    }

    let source = std::str::from_utf8(body)
        .map_err(|_| Error::invalid_input("uploaded file is not valid UTF-8"))?;

    let record = analysis::analyze_source(source)?;

    let mut value = serde_json::to_value(&record)?;
    if let Some(map) = value.as_object_mut() {
        map.insert(
            "class_diagram".to_string(),
            render_class_diagram(&record.classes, &record.relationships.inheritance).into(),
        );
        map.insert(
            "dependency_graph".to_string(),
            render_dependency_graph(&record.classes, &record.imports).into(),
        );
        map.insert("summary_text".to_string(), render_summary(&record).into());
    }
    Ok(value)
}

/// Read the request line, headers, and body
fn read_request(stream: &mut TcpStream) -> Result<Request> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts
        .next()
        .ok_or_else(|| Error::other("malformed request line"))?
        .to_string();
    let target = parts
        .next()
        .ok_or_else(|| Error::other("malformed request line"))?
        .to_string();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line)?;
        if n == 0 || line.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body)?;
    }

    Ok(Request {
        method,
        target,
        body,
    })
}

/// Send a JSON response (or an empty one) with CORS headers
fn send_response(
    stream: &mut TcpStream,
    status: u16,
    body: Option<&serde_json::Value>,
    allow_origin: &str,
) -> Result<()> {
    let payload = match body {
        Some(value) => serde_json::to_vec(value)?,
        None => Vec::new(),
    };

    let mut response = format!("HTTP/1.1 {} {}\r\n", status, status_text(status));
    response.push_str(&format!("Access-Control-Allow-Origin: {}\r\n", allow_origin));
    response.push_str("Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n");
    response.push_str("Access-Control-Allow-Headers: Content-Type\r\n");
    if !payload.is_empty() {
        response.push_str("Content-Type: application/json; charset=utf-8\r\n");
    }
    response.push_str(&format!("Content-Length: {}\r\n", payload.len()));
    response.push_str("Connection: close\r\n\r\n");

    stream.write_all(response.as_bytes())?;
    stream.write_all(&payload)?;
    stream.flush()?;

    Ok(())
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Split a request target into path and query string
fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Look up a query parameter, percent-decoded
fn query_param(query: &str, key: &str) -> Option<String> {
    for pair in query.split('&') {
        if let Some((name, value)) = pair.split_once('=') {
            if name == key {
                return Some(decode_component(value));
            }
        }
    }
    None
}

/// Decode percent-encoded characters
fn decode_component(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                result.push(byte as char);
            } else {
                result.push('%');
                result.push_str(&hex);
            }
        } else if c == '+' {
            result.push(' ');
        } else {
            result.push(c);
        }
    }

    result
}
