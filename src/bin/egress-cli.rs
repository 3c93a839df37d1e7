use std::path::PathBuf;

use clap::{Parser, Subcommand};

use egress::config::loader::load_config;
use egress::observability::logging;
use egress::{allow_http, Dispatcher, EgressConfig, HeaderSet, RequestContext};

#[derive(Parser)]
#[command(name = "egress-cli")]
#[command(about = "Issue outbound requests and signatures from the command line", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Permit plain-HTTP URLs (process-wide, irreversible)
    #[arg(long)]
    allow_http: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a URL and print the response body
    Get {
        url: String,
        /// Request header as name:value, repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// Return failures as an encoded payload instead of exiting nonzero
        #[arg(long)]
        encode_errors: bool,
    },
    /// POST a body and print the response
    Post {
        url: String,
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        #[arg(long, default_value = "application/json")]
        content_type: String,
        body: String,
    },
    /// HMAC-SHA256 over a message, printed as hex
    Hs256 { key: String, message: String },
    /// RSA-SHA256 signature with a PEM private key file, printed as hex
    Rs256 { key_file: PathBuf, message: String },
    /// Derive 32 scrypt bytes from a password and salt, printed as hex
    Scrypt { password: String, salt: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EgressConfig::default(),
    };
    if cli.allow_http {
        allow_http();
    }

    let dispatcher = Dispatcher::new(config);
    let mut ctx = RequestContext::new();

    match cli.command {
        Commands::Get {
            url,
            headers,
            encode_errors,
        } => {
            let headers = parse_headers(&headers)?;
            let body = dispatcher.get(&mut ctx, &url, &headers, encode_errors)?;
            print_body(&body);
        }
        Commands::Post {
            url,
            headers,
            content_type,
            body,
        } => {
            let headers = parse_headers(&headers)?;
            let response = dispatcher.post(&mut ctx, &url, &headers, &content_type, &body)?;
            print_body(&response);
        }
        Commands::Hs256 { key, message } => {
            println!("{}", egress::sign_hs256(&key, &message)?);
        }
        Commands::Rs256 { key_file, message } => {
            let pem = std::fs::read_to_string(&key_file)?;
            println!("{}", egress::sign_rs256(&pem, &message)?);
        }
        Commands::Scrypt { password, salt } => {
            println!("{}", egress::scrypt(&password, &salt)?);
        }
    }

    Ok(())
}

fn parse_headers(raw: &[String]) -> Result<HeaderSet, Box<dyn std::error::Error>> {
    let mut set = HeaderSet::empty();
    for item in raw {
        let (name, value) = item
            .split_once(':')
            .ok_or_else(|| format!("malformed header '{}', expected name:value", item))?;
        set = set.add(name.trim(), value.trim());
    }
    Ok(set)
}

/// Pretty-print JSON bodies, pass anything else through untouched.
fn print_body(body: &str) {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => match serde_json::to_string_pretty(&json) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", body),
        },
        Err(_) => println!("{}", body),
    }
}
