use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phcnest::{Argon2Digest, DigestParams, current_version};
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
mod auth;

#[derive(Debug, clap::Args)]
struct Argon2Args {
    /// Argon2 memory cost in KiB (default: 32768)
    #[arg(long = "argon-mem", env = "PHCNEST_MEMORY")]
    memory: Option<u32>,

    /// Argon2 time cost / iterations (default: 3)
    #[arg(long = "argon-time", env = "PHCNEST_ITERATIONS")]
    iterations: Option<u32>,

    /// Argon2 parallelism (default: 4)
    #[arg(long = "argon-parallelism", env = "PHCNEST_THREADS")]
    threads: Option<u8>,

    /// Digest length in bytes (default: 32)
    #[arg(long = "key-length", env = "PHCNEST_KEY_LENGTH")]
    key_length: Option<u32>,

    /// Salt length in bytes (default: 16)
    #[arg(long = "salt-length", env = "PHCNEST_SALT_LENGTH")]
    salt_length: Option<u32>,
}

impl Argon2Args {
    fn to_digest_params(&self) -> Result<DigestParams> {
        let default = DigestParams::default();

        Ok(DigestParams::new(
            self.iterations.unwrap_or(default.iterations),
            self.memory.unwrap_or(default.memory),
            self.threads.unwrap_or(default.threads),
            self.key_length.unwrap_or(default.key_length),
            self.salt_length.unwrap_or(default.salt_length),
        )?)
    }
}

#[derive(Debug, Parser)]
#[command(name = "phcnest")]
#[command(
    version,
    about = "Argon2id password digests in the PHC string format."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password and prints the encoded digest
    Hash {
        #[command(flatten)]
        argon2: Argon2Args,
    },

    /// Checks a password against an encoded digest
    #[command(arg_required_else_help = true)]
    Verify { encoded: String },

    /// Shows the parameters stored in an encoded digest
    #[command(arg_required_else_help = true)]
    Inspect {
        encoded: String,

        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    algorithm: &'static str,
    version: u32,
    #[serde(flatten)]
    params: &'a DigestParams,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("PHCNEST_LOG").unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Cli::parse();
    match args.command {
        Commands::Hash { argon2 } => {
            let params = argon2.to_digest_params()?;
            let password = auth::read_password()?;

            let mut digest = Argon2Digest::with_params(params);
            digest
                .generate_digest(password.as_bytes())
                .context("failed to hash password")?;
            drop(password);

            println!("{digest}");
        }
        Commands::Verify { encoded } => {
            let digest =
                Argon2Digest::from_encoded(&encoded).context("failed to decode digest")?;
            let password = auth::read_password()?;

            if digest.compare(&password) {
                println!("match");
            } else {
                tracing::debug!("password does not match stored digest");
                println!("no match");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Inspect { encoded, json } => {
            let digest =
                Argon2Digest::from_encoded(&encoded).context("failed to decode digest")?;
            let report = Report {
                algorithm: "argon2id",
                version: current_version(),
                params: digest.params(),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Algorithm    {}", report.algorithm);
                println!("Version      {}", report.version);
                println!("Memory       {} KiB", report.params.memory);
                println!("Iterations   {}", report.params.iterations);
                println!("Parallelism  {}", report.params.threads);
                println!("Salt length  {} bytes", report.params.salt_length);
                println!("Key length   {} bytes", report.params.key_length);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
