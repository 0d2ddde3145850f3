//! SubMine - Underground drilling & blasting calculator
//!
//! # Usage
//!
//! ```bash
//! # Serve the HTTP API (default)
//! submine serve --addr 0.0.0.0:8080
//!
//! # One-off estimates
//! submine face --width 3.5 --height 3.5 --advance 3 --rock dura
//! submine blast --spacing 1.1 --burden 1.0
//! submine operation --holes 40 --hole-length 3.2
//!
//! # Narrative analysis, chat, and report export (needs GEMINI_API_KEY)
//! submine analyze --rock media
//! submine chat "¿Tiempo mínimo de ventilación tras la voladura?"
//! submine report --analyze --out ./reports
//!
//! # Effective configuration as TOML
//! submine config
//! ```
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY` / `API_KEY`: Advisory service credential
//! - `SUBMINE_CONFIG`: Path to the TOML config file
//! - `SUBMINE_SERVER_ADDR`: Override the server address
//! - `SUBMINE_CORS_ORIGINS`: Comma-separated origins allowed by CORS
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use submine::api::{create_app, DashboardState};
use submine::config::{api_key_from_env, SubmineConfig};
use submine::llm::{AdvisoryService, AnalysisRequest};
use submine::report::{render_face_report, write_report};
use submine::session::{BlastInputs, FaceInputs, OperationInputs};
use submine::types::{OperationCostSummary, PatternResult, RockClass};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "submine")]
#[command(about = "SubMine underground drilling & blasting calculator")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (default search: ./submine.toml)
    #[arg(short, long, env = "SUBMINE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

/// Face geometry shared by the face, analyze, and report subcommands.
#[derive(clap::Args, Debug, Clone, Copy)]
struct FaceArgs {
    /// Face width (m)
    #[arg(long, default_value_t = 3.5)]
    width: f64,
    /// Face height (m)
    #[arg(long, default_value_t = 3.5)]
    height: f64,
    /// Advance per round (m)
    #[arg(long, default_value_t = 3.0)]
    advance: f64,
    /// Rock class: soft|medium|hard (or blanda|media|dura)
    #[arg(long, default_value = "medium")]
    rock: RockClass,
}

impl From<FaceArgs> for FaceInputs {
    fn from(a: FaceArgs) -> Self {
        Self {
            width: a.width,
            height: a.height,
            advance: a.advance,
            rock_class: a.rock,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Serve the HTTP API
    Serve {
        /// Override the server address (default from config: 127.0.0.1:8080)
        #[arg(short, long, env = "SUBMINE_SERVER_ADDR")]
        addr: Option<String>,
    },

    /// Drilling pattern for a face from rock-class coefficients
    Face {
        #[command(flatten)]
        face: FaceArgs,
    },

    /// Drilling pattern from a manually chosen spacing and burden
    Blast {
        #[arg(long, default_value_t = 1.1)]
        spacing: f64,
        #[arg(long, default_value_t = 1.0)]
        burden: f64,
        #[arg(long, default_value_t = 3.5)]
        width: f64,
        #[arg(long, default_value_t = 3.5)]
        height: f64,
        #[arg(long, default_value_t = 3.0)]
        advance: f64,
    },

    /// Operation cost summary for a drilled round
    Operation {
        #[arg(long, default_value_t = 3.0)]
        advance: f64,
        /// Number of holes
        #[arg(long, default_value_t = 40)]
        holes: u64,
        /// Hole length (m)
        #[arg(long, default_value_t = 3.2)]
        hole_length: f64,
        /// Price per hole (S/)
        #[arg(long, default_value_t = 15.0)]
        unit_price: f64,
    },

    /// Narrative technical analysis of a face design
    Analyze {
        #[command(flatten)]
        face: FaceArgs,
    },

    /// Ask the mining assistant a single question
    Chat {
        /// The question
        message: String,
    },

    /// Write the technical report for a face design
    Report {
        #[command(flatten)]
        face: FaceArgs,
        /// Include a narrative analysis
        #[arg(long)]
        analyze: bool,
        /// Output directory (default from config: ./reports)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}

// ============================================================================
// Output
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_pattern(result: &PatternResult) {
    println!("Spacing:        {} m", result.spacing);
    println!("Burden:         {} m", result.burden);
    println!("Holes:          {}", result.hole_count);
    println!("Explosive mass: {:.2} kg", result.total_explosive_mass);
    println!("Dynamite:       S/ {:.2}", result.costs.dynamite);
    println!("Detonators:     S/ {:.2}", result.costs.detonator);
    println!("Cord:           S/ {:.2}", result.costs.cord);
    println!("Total:          S/ {:.2}", result.costs.total);
}

fn print_operation(summary: &OperationCostSummary) {
    println!("Volume:         {:.2} m³", summary.volume_estimate);
    println!("Total cost:     S/ {:.2}", summary.total_cost);
    println!("Cost per hole:  S/ {:.2}", summary.cost_per_hole);
    println!("Cost per metre: S/ {:.2}", summary.cost_per_meter);
}

// ============================================================================
// Commands
// ============================================================================

async fn run_server(
    config: &SubmineConfig,
    advisor: AdvisoryService,
    addr: Option<String>,
) -> Result<()> {
    let addr = addr.unwrap_or_else(|| config.server.addr.clone());
    let state = DashboardState::new(config.clone(), advisor);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {addr}"))?;
    info!(addr = %addr, site = %config.site.name, "HTTP server listening");

    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("HTTP server shutting down");
        })
        .await
        .context("HTTP server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn analyze_face(
    advisor: &AdvisoryService,
    inputs: FaceInputs,
    result: PatternResult,
) -> Result<String> {
    let request = AnalysisRequest::new(inputs.geometry(), inputs.rock_class, result)
        .context("Face design cannot be analysed")?;
    Ok(advisor.technical_analysis(&request).await)
}

async fn run_command(
    cli: CliArgs,
    config: &SubmineConfig,
    advisor: AdvisoryService,
) -> Result<()> {
    let command = cli.command.unwrap_or(SubCommand::Serve { addr: None });

    match command {
        SubCommand::Serve { addr } => run_server(config, advisor, addr).await?,

        SubCommand::Face { face } => {
            let result = FaceInputs::from(face).compute()?;
            if cli.json {
                print_json(&result)?;
            } else {
                print_pattern(&result);
            }
        }

        SubCommand::Blast {
            spacing,
            burden,
            width,
            height,
            advance,
        } => {
            let inputs = BlastInputs {
                spacing,
                burden,
                width,
                height,
                advance,
            };
            let result = inputs.compute()?;
            if cli.json {
                print_json(&result)?;
            } else {
                print_pattern(&result);
            }
        }

        SubCommand::Operation {
            advance,
            holes,
            hole_length,
            unit_price,
        } => {
            let inputs = OperationInputs {
                advance,
                hole_count: holes,
                hole_length,
                unit_price,
            };
            let summary = inputs.compute()?;
            if cli.json {
                print_json(&summary)?;
            } else {
                print_operation(&summary);
            }
        }

        SubCommand::Analyze { face } => {
            let inputs = FaceInputs::from(face);
            let result = inputs.compute()?;
            let analysis = analyze_face(&advisor, inputs, result).await?;
            if cli.json {
                print_json(&serde_json::json!({ "result": result, "analysis": analysis }))?;
            } else {
                print_pattern(&result);
                println!();
                println!("{analysis}");
            }
        }

        SubCommand::Chat { message } => match advisor.chat(&message).await {
            Some(reply) => println!("{reply}"),
            None => warn!("Empty message, nothing sent"),
        },

        SubCommand::Report { face, analyze, out } => {
            let inputs = FaceInputs::from(face);
            let result = inputs.compute()?;
            let analysis = if analyze {
                Some(analyze_face(&advisor, inputs, result).await?)
            } else {
                None
            };

            let now = Utc::now();
            let text = render_face_report(
                &config.site,
                &inputs,
                &result,
                analysis.as_deref(),
                advisor.language(),
                now,
            );
            let dir = out.unwrap_or_else(|| config.report.output_dir.clone());
            let path = write_report(&dir, &text, now)?;
            println!("{}", path.display());
        }

        SubCommand::Config => print!("{}", config.to_toml()?),
    }

    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = CliArgs::parse();

    let config = match &cli.config {
        Some(path) => SubmineConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SubmineConfig::load(),
    };

    let api_key = api_key_from_env();
    let advisor = AdvisoryService::from_config(&config.advisory, api_key.as_deref());
    info!(
        site = %config.site.name,
        advisory = advisor.is_enabled(),
        language = ?advisor.language(),
        "SubMine configured"
    );

    run_command(cli, &config, advisor).await
}
