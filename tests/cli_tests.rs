//! Runs the `utm-sim` binary itself.

use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn connect_timeout_exits_with_failure() {
    let track = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/example_track.csv");
    // Nobody dials a tcpin listener, so the connect blocks until the timeout.
    let mut child = Command::new(env!("CARGO_BIN_EXE_utm-sim"))
        .arg("-i")
        .arg(&track)
        .args(["-o", &format!("tcpin:127.0.0.1:{}", free_port())])
        .args(["--connect-timeout", "300ms"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if started.elapsed() > Duration::from_secs(10) {
            child.kill().unwrap();
            child.wait().unwrap();
            panic!("utm-sim still running 10s after a 300ms connect timeout");
        }
        thread::sleep(Duration::from_millis(50));
    };

    assert!(!status.success());
}
