use std::io::{Read, Write};
use std::net::TcpStream;
use std::process::{Child, Command};
use std::thread;
use std::time::{Duration, Instant};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_podium")
}

struct ServerGuard(Child);

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn spawn_server() -> (ServerGuard, String) {
    let port = 42000 + (std::process::id() % 20000) as u16;
    let addr = format!("127.0.0.1:{port}");
    let child = Command::new(bin())
        .arg("serve")
        .env("PODIUM_BIND", &addr)
        .spawn()
        .expect("server should start");
    let guard = ServerGuard(child);

    let deadline = Instant::now() + Duration::from_secs(10);
    while TcpStream::connect(&addr).is_err() {
        assert!(Instant::now() < deadline, "server did not come up on {addr}");
        thread::sleep(Duration::from_millis(50));
    }
    (guard, addr)
}

#[test]
fn large_post_body_split_across_segments_is_read_in_full() {
    let (_guard, addr) = spawn_server();

    // a form well past any single read() buffer; truncation would break the
    // JSON and turn this into a 400
    let name = "a".repeat(80_000);
    let body = format!(
        r#"{{"name":"{name}","totalPlayers":"100","totalAmount":"1000","tiers":[{{"label":"1-100","startRank":1,"endRank":100,"amountPerUser":"10"}}]}}"#
    );
    let head = format!(
        "POST /api/reward-tiers/validate HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );

    let mut stream = TcpStream::connect(&addr).expect("connect");
    stream.write_all(head.as_bytes()).expect("send headers");
    stream.flush().expect("flush headers");

    // deliver the body in two halves with a pause so the server sees it
    // arrive over multiple reads
    let (first, second) = body.split_at(body.len() / 2);
    stream.write_all(first.as_bytes()).expect("send first half");
    stream.flush().expect("flush first half");
    thread::sleep(Duration::from_millis(150));
    stream.write_all(second.as_bytes()).expect("send second half");
    stream.flush().expect("flush second half");

    let mut response = String::new();
    stream.read_to_string(&mut response).expect("read response");

    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.contains("\"valid\": true"), "got: {response}");
    assert!(response.contains("\"distributed\": 1000.0"), "got: {response}");
}
