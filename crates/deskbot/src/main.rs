// CLI entry point for Deskbot.
//
// Connects to an EDOPro server, plays one room's worth of duels, and exits.
// Exit status is 0 when the duels end normally and 1 on any refusal or
// fault. Diagnostics go to stderr through `tracing`; set `RUST_LOG` to
// change the level (default: info).
//
// Usage:
//   deskbot [OPTIONS]
//     --config <FILE>   JSON config file (default: built-in defaults)
//     --host <HOST>     Server host (default: localhost)
//     --port <PORT>     Server port (default: 7911)
//     --deck <FILE>     .ydk deck list
//     --script <FILE>   Engine script
//     --room <ID>       Join this room id

use std::path::PathBuf;
use std::process::ExitCode;

use deskbot::{ClientConfig, DeskbotError};
use deskbot_session::RoomChoice;
use tracing_subscriber::EnvFilter;

/// Values given on the command line. Each one overrides the config file.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    deck: Option<PathBuf>,
    script: Option<PathBuf>,
    room: Option<u32>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match load_config(parse_args()).await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    match deskbot::run(&config).await {
        Ok(end) if end.is_clean() => {
            tracing::info!("good bye");
            ExitCode::SUCCESS
        }
        Ok(end) => {
            tracing::error!(reason = %end.reason, "session stopped");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "session failed");
            ExitCode::FAILURE
        }
    }
}

async fn load_config(args: Args) -> Result<ClientConfig, DeskbotError> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path).await?,
        None => ClientConfig::default(),
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(deck) = args.deck {
        config.deck = Some(deck);
    }
    if let Some(script) = args.script {
        config.script = Some(script);
    }
    if let Some(id) = args.room {
        let password = match &config.session.room {
            RoomChoice::Join { password, .. } => password.clone(),
            RoomChoice::Host(_) => String::new(),
        };
        config.session.room = RoomChoice::Join { id, password };
    }
    Ok(config)
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> Args {
    let mut parsed = Args::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                parsed.config = Some(value(&args, i, "--config").into());
            }
            "--host" => {
                i += 1;
                parsed.host = Some(value(&args, i, "--host").to_owned());
            }
            "--port" => {
                i += 1;
                parsed.port = Some(value(&args, i, "--port").parse().unwrap_or_else(|_| {
                    eprintln!("--port requires a valid port number");
                    std::process::exit(1);
                }));
            }
            "--deck" => {
                i += 1;
                parsed.deck = Some(value(&args, i, "--deck").into());
            }
            "--script" => {
                i += 1;
                parsed.script = Some(value(&args, i, "--script").into());
            }
            "--room" => {
                i += 1;
                parsed.room = Some(value(&args, i, "--room").parse().unwrap_or_else(|_| {
                    eprintln!("--room requires a numeric room id");
                    std::process::exit(1);
                }));
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    parsed
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    args.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("{flag} requires a value");
        std::process::exit(1);
    })
}

fn print_usage() {
    println!("Usage: deskbot [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <FILE>   JSON config file");
    println!("  --host <HOST>     Server host (default: localhost)");
    println!("  --port <PORT>     Server port (default: 7911)");
    println!("  --deck <FILE>     .ydk deck list");
    println!("  --script <FILE>   Engine script");
    println!("  --room <ID>       Join this room id");
    println!("  --help, -h        Show this help");
}
