use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use utm_sim::config::{Options, Settings};
use utm_sim::dataset::{Dataset, RowPolicy};
use utm_sim::emitter::Scheduler;
use utm_sim::transport;

#[derive(Parser)]
#[command(name = "utm-sim")]
#[command(about = "MAVLink UTM_GLOBAL_POSITION / GLOBAL_POSITION_INT generator")]
struct Cli {
    /// CSV file path
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output connection address, e.g. tcpout:$ip:$port, udpout:$ip:$port
    #[arg(short, long)]
    output: Option<String>,
    /// Just use data from the specified system ID
    #[arg(short = 's', long = "sys-id")]
    sys_id: Option<u8>,
    /// Only send GLOBAL_POSITION_INT
    #[arg(long, visible_alias = "ardupilot")]
    primary_only: bool,
    /// Increase output and logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// YAML file with default values for these options
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Interval between GLOBAL_POSITION_INT messages
    #[arg(long)]
    position_interval_ms: Option<u32>,
    /// Interval between UTM_GLOBAL_POSITION messages
    #[arg(long)]
    utm_interval_ms: Option<u32>,
    /// Give up connecting after this long, e.g. 10s
    #[arg(long)]
    connect_timeout: Option<String>,
    /// Stop after replaying the file this many times
    #[arg(long)]
    loops: Option<u64>,
    /// What to do with rows that fail to parse
    #[arg(long, value_enum)]
    on_invalid_row: Option<RowPolicy>,
    /// MAVLink system id of the simulated vehicle
    #[arg(long)]
    source_system: Option<u8>,
    /// MAVLink component id of the simulated vehicle
    #[arg(long)]
    source_component: Option<u8>,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            input: self.input.clone(),
            output: self.output.clone(),
            sys_id: self.sys_id,
            primary_only: self.primary_only.then_some(true),
            position_interval_ms: self.position_interval_ms,
            utm_interval_ms: self.utm_interval_ms,
            connect_timeout: self.connect_timeout.clone(),
            loops: self.loops,
            on_invalid_row: self.on_invalid_row,
            source_system: self.source_system,
            source_component: self.source_component,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match load_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let dataset = match Dataset::load(&settings.input, settings.row_policy) {
        Ok(d) => d,
        Err(e) => {
            log::error!("Error reading {}: {}", settings.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(run(settings, dataset));
    // A dial abandoned by the connect timeout may still be blocked; don't wait for it.
    runtime.shutdown_background();
    code
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings, utm_sim::config::ConfigError> {
    let file = match &cli.config {
        Some(path) => Options::from_file(path)?,
        None => Options::default(),
    };
    Settings::try_from(cli.options().or(file))
}

async fn run(settings: Settings, dataset: Dataset) -> ExitCode {
    let sink = match transport::connect(
        &settings.output,
        settings.identity,
        settings.connect_timeout,
    )
    .await
    {
        Ok(s) => s,
        Err(e) => {
            log::error!("MAVLink connection failed, exiting: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut scheduler = match Scheduler::new(settings.emitter, sink) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match scheduler.run(&dataset, shutdown_signal()).await {
        Ok(summary) => {
            log::info!(
                "Sent {} GLOBAL_POSITION_INT and {} UTM_GLOBAL_POSITION messages",
                summary.primary_sent,
                summary.secondary_sent
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}
