use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

pub mod api;
pub mod console;
pub mod routes;

pub fn run_server(bind_addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    println!("podium console listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

const MAX_REQUEST_BYTES: usize = 4 * 1024 * 1024;

fn handle_connection(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut data = Vec::new();
    let mut chunk = [0_u8; 8192];

    // read until the blank line ending the header block arrives
    let body_start = loop {
        let bytes_read = stream.read(&mut chunk)?;
        if bytes_read == 0 {
            match header_end(&data) {
                Some(end) => break end,
                None => return Ok(()),
            }
        }
        data.extend_from_slice(&chunk[..bytes_read]);
        if let Some(end) = header_end(&data) {
            break end;
        }
        if data.len() > MAX_REQUEST_BYTES {
            return Ok(());
        }
    };

    let head = String::from_utf8_lossy(&data[..body_start]).into_owned();
    let request_line = head.lines().next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET").to_string();
    let path = request_parts.next().unwrap_or("/").to_string();

    let content_length = head
        .lines()
        .skip(1)
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
        .min(MAX_REQUEST_BYTES);

    // bodies can arrive split across TCP segments; keep reading to the
    // declared length
    while data.len() < body_start + content_length {
        let bytes_read = stream.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }
        data.extend_from_slice(&chunk[..bytes_read]);
    }
    let body_end = (body_start + content_length).min(data.len());
    let body = String::from_utf8_lossy(&data[body_start..body_end]);

    let response = routes::route_request(&method, &path, &body).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

/// Offset of the first body byte, once the header/body separator is present.
fn header_end(data: &[u8]) -> Option<usize> {
    if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
        return Some(pos + 4);
    }
    data.windows(2).position(|w| w == b"\n\n").map(|pos| pos + 2)
}
