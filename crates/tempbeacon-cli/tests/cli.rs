use std::io::{BufRead, BufReader, Read};
use std::net::UdpSocket;
use std::process::{Child, Command as StdCommand, Stdio};
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempbeacon_core::{PowerStatus, decode, encode, validate};

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("tempbeacon"))
}

struct KillOnDrop(Child);

impl Drop for KillOnDrop {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

/// Start `tempbeacon receive 0 ...` and return the child plus the port it
/// reports on its first stdout line.
fn spawn_receiver(extra: &[&str]) -> (KillOnDrop, BufReader<std::process::ChildStdout>, u16) {
    let mut child = StdCommand::new(env!("CARGO_BIN_EXE_tempbeacon"))
        .arg("receive")
        .arg("0")
        .args(extra)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn receiver");
    let stdout = child.stdout.take().expect("stdout");
    let mut stdout = BufReader::new(stdout);
    let mut first = String::new();
    stdout.read_line(&mut first).expect("read listening line");
    let port = first
        .trim()
        .strip_prefix("Listening on port ")
        .and_then(|rest| rest.strip_suffix("..."))
        .and_then(|port| port.parse().ok())
        .unwrap_or_else(|| panic!("unexpected first line: {first:?}"));
    (KillOnDrop(child), stdout, port)
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("emit").and(contains("receive")));
    cmd().arg("emit").arg("--help").assert().success();
    cmd().arg("receive").arg("--help").assert().success();
}

#[test]
fn emit_requires_host_port_and_interval() {
    cmd()
        .arg("emit")
        .arg("127.0.0.1")
        .arg("5000")
        .assert()
        .failure();
}

#[test]
fn unresolvable_host_exits_with_one() {
    cmd()
        .arg("emit")
        .arg("no-such-host.invalid")
        .arg("5000")
        .arg("1")
        .arg("--count")
        .arg("1")
        .assert()
        .code(1)
        .stderr(
            contains("error: failed to resolve address")
                .and(contains("hint:"))
                .and(contains("error: error").not()),
        );
}

#[test]
fn emit_sends_sequenced_readings() {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("bind");
    socket
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("timeout");
    let port = socket.local_addr().expect("local addr").port();

    cmd()
        .arg("emit")
        .arg("127.0.0.1")
        .arg(port.to_string())
        .arg("0")
        .arg("--count")
        .arg("3")
        .arg("--battery")
        .arg("--temperature")
        .arg("5000")
        .assert()
        .success();

    let mut buf = [0u8; 64];
    for expected_id in 0..3u8 {
        let (len, _) = socket.recv_from(&mut buf).expect("datagram");
        assert_eq!(len, 8);
        let reading = decode(&buf[..len]).expect("decode");
        assert_eq!(reading.id, expected_id);
        assert_eq!(reading.temp_status.temperature(), 1200);
        assert_eq!(reading.temp_status.power(), PowerStatus::Battery);
        assert!(validate(&reading));
    }
}

#[test]
fn receive_prints_reading() {
    let (mut child, mut stdout, port) = spawn_receiver(&["--count", "1"]);
    let sender = UdpSocket::bind("127.0.0.1:0").expect("bind");
    sender
        .send_to(&encode(0, 200, PowerStatus::Network, 0), ("127.0.0.1", port))
        .expect("send");

    let mut output = String::new();
    stdout.read_to_string(&mut output).expect("read output");
    let status = child.0.wait().expect("wait");

    assert!(status.success());
    assert!(output.contains("ID: 0"));
    assert!(output.contains("Timestamp: 0"));
    assert!(output.contains("Temperature: 20.0"));
    assert!(output.contains("Power status: network"));
    assert!(output.contains("Checksum: 0x38 (valid)"));
}

#[test]
fn receive_skips_malformed_and_flags_bad_checksum() {
    let (mut child, mut stdout, port) = spawn_receiver(&["--count", "1", "--json"]);
    let sender = UdpSocket::bind("127.0.0.1:0").expect("bind");
    sender
        .send_to(b"short", ("127.0.0.1", port))
        .expect("send garbage");
    let mut corrupted = encode(1_700_000_000, 655, PowerStatus::Battery, 9);
    corrupted[7] ^= 0xFF;
    sender
        .send_to(&corrupted, ("127.0.0.1", port))
        .expect("send reading");

    let mut output = String::new();
    stdout.read_to_string(&mut output).expect("read output");
    assert!(child.0.wait().expect("wait").success());

    let value: serde_json::Value = serde_json::from_str(output.trim()).expect("json line");
    assert_eq!(value["id"], 9);
    assert_eq!(value["whole_degrees"], 65);
    assert_eq!(value["tenths_digit"], 5);
    assert_eq!(value["power"], "battery");
    assert_eq!(value["valid"], false);
    assert!(value["source"].as_str().unwrap_or("").starts_with("127.0.0.1:"));
}

#[test]
fn receive_on_busy_port_fails() {
    let busy = UdpSocket::bind("0.0.0.0:0").expect("bind");
    let port = busy.local_addr().expect("local addr").port();
    cmd()
        .arg("receive")
        .arg(port.to_string())
        .assert()
        .code(1)
        .stderr(contains("error:"));
}
