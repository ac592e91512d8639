use std::net::SocketAddr;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tempbeacon_core::{
    EmitterSession, FixedSensor, PowerStatus, ReadingSummary, Receiver, SimulatedSensor,
    TemperatureSource, UdpTransport, describe, resolve, unix_timestamp_now,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TEMPBEACON_BUILD_COMMIT"),
    " ",
    env!("TEMPBEACON_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "tempbeacon")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Fire-and-forget UDP temperature beacon (8-byte readings).",
    long_about = None,
    after_help = "Examples:\n  tempbeacon emit 192.168.0.10 5000 2\n  tempbeacon emit localhost 5000 1 --battery --temperature 215\n  tempbeacon receive 5000"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send one reading every INTERVAL seconds to HOST:PORT.
    Emit {
        /// Destination host name or IP address
        host: String,

        /// Destination UDP port
        port: u16,

        /// Seconds to wait between readings
        interval: u64,

        /// Report battery power instead of network power
        #[arg(long)]
        battery: bool,

        /// Send a fixed temperature (tenths of a degree) instead of the simulated sensor
        #[arg(long, allow_negative_numbers = true)]
        temperature: Option<i32>,

        /// Starting temperature of the simulated sensor (tenths of a degree)
        #[arg(long, default_value_t = 215, conflicts_with = "temperature")]
        start: i32,

        /// Stop after sending N readings
        #[arg(long)]
        count: Option<u64>,
    },
    /// Listen on PORT and print every reading received.
    Receive {
        /// UDP port to listen on (0 picks a free port)
        port: u16,

        /// Print one JSON object per reading
        #[arg(long)]
        json: bool,

        /// Stop after N well-formed readings
        #[arg(long)]
        count: Option<u64>,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Emit {
            host,
            port,
            interval,
            battery,
            temperature,
            start,
            count,
        } => cmd_emit(&host, port, interval, battery, temperature, start, count),
        Commands::Receive { port, json, count } => cmd_receive(port, json, count),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(1)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tempbeacon=info,tempbeacon_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_emit(
    host: &str,
    port: u16,
    interval: u64,
    battery: bool,
    temperature: Option<i32>,
    start: i32,
    count: Option<u64>,
) -> Result<(), CliError> {
    let dest = resolve(host, port).map_err(|err| {
        CliError::new(
            format!("failed to resolve address: {err}"),
            Some("check the host name and port".to_string()),
        )
    })?;
    let transport = UdpTransport::for_destination(dest).context("socket failed")?;
    let power = if battery {
        PowerStatus::Battery
    } else {
        PowerStatus::Network
    };
    let interval = Duration::from_secs(interval);

    match temperature {
        Some(tenths) => run_emitter(
            EmitterSession::new(FixedSensor(tenths), power),
            &transport,
            dest,
            interval,
            count,
        ),
        None => run_emitter(
            EmitterSession::new(SimulatedSensor::new(start), power),
            &transport,
            dest,
            interval,
            count,
        ),
    }
}

fn run_emitter<S: TemperatureSource>(
    mut session: EmitterSession<S>,
    transport: &UdpTransport,
    dest: SocketAddr,
    interval: Duration,
    count: Option<u64>,
) -> Result<(), CliError> {
    info!(
        %dest,
        interval_s = interval.as_secs(),
        power = %session.power(),
        "emitting readings"
    );
    let mut sent = 0u64;
    while count.is_none_or(|limit| sent < limit) {
        if sent > 0 {
            thread::sleep(interval);
        }
        let reading = session
            .send_next(transport, dest, unix_timestamp_now())
            .context("sendto failed")?;
        let summary = describe(&reading);
        info!(
            id = summary.id,
            temperature = %summary.temperature_label(),
            checksum = %format!("{:#x}", summary.checksum),
            "sent reading"
        );
        sent += 1;
    }
    Ok(())
}

fn cmd_receive(port: u16, json: bool, count: Option<u64>) -> Result<(), CliError> {
    let transport = UdpTransport::listen(port).map_err(|err| {
        CliError::new(
            format!("error while setting up port {port}: {err}"),
            Some("choose a free port, or 0 to pick one".to_string()),
        )
    })?;
    let receiver = Receiver::new(transport);
    let local = receiver
        .transport()
        .local_addr()
        .context("getsockname failed")?;
    println!("Listening on port {}...", local.port());

    let mut received = 0u64;
    while count.is_none_or(|limit| received < limit) {
        let (source, reading) = receiver.next_reading().context("recvfrom failed")?;
        let summary = describe(&reading);
        if json {
            print_json(source, &summary)?;
        } else {
            print_reading(source, &summary);
        }
        received += 1;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReading<'a> {
    source: String,
    #[serde(flatten)]
    reading: &'a ReadingSummary,
}

fn print_json(source: SocketAddr, summary: &ReadingSummary) -> Result<(), CliError> {
    let line = serde_json::to_string(&JsonReading {
        source: source.to_string(),
        reading: summary,
    })
    .context("JSON serialization failed")?;
    println!("{line}");
    Ok(())
}

fn print_reading(source: SocketAddr, summary: &ReadingSummary) {
    println!("Reading from {}:{}", source.ip(), source.port());
    println!("ID: {}", summary.id);
    println!("Timestamp: {}", summary.timestamp);
    println!("Temperature: {}", summary.temperature_label());
    println!("Power status: {}", summary.power);
    println!(
        "Checksum: {:#x} ({})",
        summary.checksum,
        summary.validity_label()
    );
    println!();
}
