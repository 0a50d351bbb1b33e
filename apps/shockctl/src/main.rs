use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use shock_driver::{builtin_registry, frame, SendMetrics};
use shock_protocol::{bitstring, Channel, Intensity, Message, Operation};
use tracing::{info, warn};

mod config;
use config::{load_config, SenderConfig};

#[derive(Parser, Debug)]
#[command(
    name = "shockctl",
    version,
    about = "Encode and send shock collar control messages",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the encoded message as a bit string
    Encode {
        /// Channel: 1 or 2
        #[arg(long, default_value = "1")]
        channel: Channel,
        /// Operation: shock, vibrate or beep
        #[arg(long, default_value = "beep")]
        operation: Operation,
        /// Intensity 0-100
        #[arg(long, default_value = "0")]
        intensity: Intensity,
        /// Print the softpwm symbol stream instead of the message bits
        #[arg(long, action = ArgAction::SetTrue)]
        framed: bool,
    },
    /// Decode a 42-bit message and check its verification bits
    Decode {
        /// Message bits, e.g. 010000001001011100010101100100110011111100
        bits: String,
        /// Print the report as JSON
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Build a message and send it through a driver chain
    Send {
        /// Driver string, e.g. "softpwm raspi_gpio 17"
        #[arg(long)]
        driver: Option<String>,
        /// YAML config file with defaults for this command
        #[arg(long)]
        config: Option<String>,
        #[arg(long)]
        channel: Option<Channel>,
        #[arg(long)]
        operation: Option<Operation>,
        #[arg(long)]
        intensity: Option<Intensity>,
        /// Number of times the message is sent
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        repeat: Option<u32>,
        /// Print send counters after sending
        #[arg(long, action = ArgAction::SetTrue)]
        metrics: bool,
    },
    /// List registered encoders and transports
    Drivers,
}

struct SendArgs {
    driver: Option<String>,
    config: Option<String>,
    channel: Option<Channel>,
    operation: Option<Operation>,
    intensity: Option<Intensity>,
    repeat: Option<u32>,
    metrics: bool,
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            channel,
            operation,
            intensity,
            framed,
        } => encode(channel, operation, intensity, framed),
        Commands::Decode { bits, json } => decode(&bits, json),
        Commands::Send {
            driver,
            config,
            channel,
            operation,
            intensity,
            repeat,
            metrics,
        } => send(SendArgs {
            driver,
            config,
            channel,
            operation,
            intensity,
            repeat,
            metrics,
        }),
        Commands::Drivers => drivers(),
    }
}

fn setup_tracing() {
    // Best-effort; avoid panics if already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn build_message(channel: Channel, operation: Operation, intensity: Intensity) -> Message {
    Message::new()
        .with_channel(channel)
        .with_operation(operation)
        .with_intensity(intensity)
        .finalize()
}

fn encode(channel: Channel, operation: Operation, intensity: Intensity, framed: bool) -> Result<()> {
    let msg = build_message(channel, operation, intensity);
    if framed {
        println!("{}", bitstring(&frame(&msg)));
    } else {
        println!("{msg}");
    }
    Ok(())
}

fn decode(bits: &str, json: bool) -> Result<()> {
    let msg: Message = bits.parse().context("parsing message bits")?;
    let report = msg.report();
    if !report.is_verified() {
        warn!("message failed verification");
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn send(args: SendArgs) -> Result<()> {
    let cfg = match args.config.as_deref() {
        Some(path) => load_config(path)?,
        None => SenderConfig::default(),
    };
    let driver = args
        .driver
        .or(cfg.driver)
        .context("no driver given: pass --driver or set `driver` in the config file")?;
    let channel = args.channel.or(cfg.channel).unwrap_or_default();
    let operation = args.operation.or(cfg.operation).unwrap_or_default();
    let intensity = args.intensity.or(cfg.intensity).unwrap_or_default();
    let repeat = args.repeat.unwrap_or(cfg.repeat);

    let registry = builtin_registry();
    let mut encoder = registry
        .setup(&driver)
        .with_context(|| format!("error initializing driver {driver:?}"))?;

    let msg = build_message(channel, operation, intensity);
    info!(
        %channel,
        %operation,
        %intensity,
        repeat,
        bits = %msg,
        "sending message"
    );

    let metrics = SendMetrics::new().context("initializing metrics")?;
    for attempt in 1..=repeat {
        metrics
            .output(&mut encoder, &msg)
            .with_context(|| format!("error sending message ({attempt}/{repeat})"))?;
    }
    if args.metrics {
        print!("{}", metrics.encode_text());
    }
    Ok(())
}

fn drivers() -> Result<()> {
    let registry = builtin_registry();
    for name in registry.encoder_names() {
        println!("encoder\t{name}");
    }
    for name in registry.transport_names() {
        println!("transport\t{name}");
    }
    Ok(())
}
