use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use gate_types::Fid;
use hub_client::ProviderKind;
use qualification::{Qualification, RequirementKind};
use server::views::{render_frame, render_image};
use server::{GateConfig, GateHandler, GateSettings, IndeterminatePolicy, Mode, View, ViewContext};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Frame Gate - Farcaster frame that checks likes, recasts and follows
#[derive(Parser)]
#[command(name = "frame-gate")]
#[command(about = "Gate a Farcaster frame behind interactions with a cast", long_about = None)]
struct Cli {
    #[command(flatten)]
    gate: GateArgs,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every subcommand
#[derive(Args, Debug)]
struct GateArgs {
    /// Provider API key
    #[arg(long, env = "FRAME_GATE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Reaction provider (warpcast or neynar)
    #[arg(long, env = "FRAME_GATE_PROVIDER", default_value = "warpcast", global = true)]
    provider: ProviderKind,

    /// Override the provider's base URL
    #[arg(long, env = "FRAME_GATE_API_BASE", global = true)]
    api_base: Option<String>,

    /// Hash of the cast visitors must interact with
    #[arg(long, env = "FRAME_GATE_CAST", global = true)]
    cast: Option<String>,

    /// Fid visitors must follow
    #[arg(long, env = "FRAME_GATE_FOLLOWEE", global = true)]
    followee: Option<String>,

    /// Required interactions, comma separated
    #[arg(
        long,
        env = "FRAME_GATE_REQUIRE",
        value_delimiter = ',',
        default_value = "like,recast,follow",
        global = true
    )]
    require: Vec<RequirementKind>,

    /// Externally reachable base URL of this server
    #[arg(long, env = "FRAME_GATE_PUBLIC_URL", default_value = "http://localhost:3000", global = true)]
    public_url: String,

    /// Address to bind
    #[arg(long, env = "FRAME_GATE_LISTEN", default_value = "0.0.0.0:3000", global = true)]
    listen: SocketAddr,

    /// development or production
    #[arg(long, env = "FRAME_GATE_MODE", default_value = "development", global = true)]
    mode: Mode,

    /// Static asset directory served under /public in development
    #[arg(long, env = "FRAME_GATE_ASSETS_DIR", default_value = "public", global = true)]
    assets_dir: PathBuf,

    /// View for provider failures: call-to-action or error
    #[arg(long, env = "FRAME_GATE_ON_INDETERMINATE", default_value = "call-to-action", global = true)]
    on_indeterminate: IndeterminatePolicy,
}

impl GateArgs {
    fn into_config(self) -> Result<GateConfig> {
        let settings = GateSettings {
            api_key: self.api_key,
            provider: self.provider,
            api_base: self.api_base,
            cast: self.cast,
            followee: self.followee,
            requirements: self.require,
            public_url: self.public_url,
            listen_addr: self.listen,
            mode: self.mode,
            assets_dir: self.assets_dir,
            on_indeterminate: self.on_indeterminate,
        };
        GateConfig::from_settings(settings).context("Invalid configuration")
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the frame server
    Serve,

    /// Check one fid against the configured requirements
    Check {
        /// Fid to check
        #[arg(long)]
        fid: Fid,
    },

    /// Print a view's frame HTML or SVG image
    Preview {
        /// prompt, welcome, call-to-action, error or unverified
        #[arg(long, default_value = "prompt")]
        view: String,

        /// Print the SVG image instead of the frame HTML
        #[arg(long)]
        image: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    let config = cli.gate.into_config()?;
    info!(
        "frame-gate {} configured: provider={} cast={} mode={}",
        env!("CARGO_PKG_VERSION"),
        config.provider,
        config.cast,
        config.mode
    );

    match cli.command {
        Commands::Serve => server::serve(config).await?,
        Commands::Check { fid } => handle_check(&config, fid).await?,
        Commands::Preview { view, image } => handle_preview(&config, &view, image)?,
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Handle the 'check' command
async fn handle_check(config: &GateConfig, fid: Fid) -> Result<()> {
    let gate = GateHandler::from_config(config)?;
    let checker = gate.checker();

    println!(
        "{}",
        format!(
            "Checking fid {} against cast {} via {}",
            fid,
            checker.target(),
            checker.provider_name()
        )
        .bold()
        .blue()
    );

    let start = Instant::now();
    let outcome = checker.check(fid).await;
    let elapsed = start.elapsed();

    for kind in &config.requirements {
        let line = format!("{} ({})", kind, describe(*kind, config));
        match &outcome {
            Qualification::Indeterminate { .. } => println!("{} {}", "?".yellow(), line),
            _ if outcome.missing().contains(kind) => println!("{} {}", "✗".red(), line),
            _ => println!("{} {}", "✓".green(), line),
        }
    }

    let view = gate.view_for(&outcome);
    match &outcome {
        Qualification::Qualified => println!("{}", "Qualified".green().bold()),
        Qualification::NotQualified { .. } => println!("{}", "Not qualified".red().bold()),
        Qualification::Indeterminate { reason } => {
            println!("{} {}", "Could not verify:".yellow().bold(), reason)
        }
    }
    println!("Frame would show: {} ({:?})", view.name(), elapsed);

    Ok(())
}

fn describe(kind: RequirementKind, config: &GateConfig) -> String {
    match kind {
        RequirementKind::Like | RequirementKind::Recast => format!("cast {}", config.cast),
        RequirementKind::Follow => match config.followee {
            Some(fid) => format!("fid {}", fid),
            None => "no followee".to_string(),
        },
    }
}

/// Handle the 'preview' command
fn handle_preview(config: &GateConfig, name: &str, image: bool) -> Result<()> {
    let view = View::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = View::ALL.iter().map(|v| v.name()).collect();
        anyhow!("Unknown view '{}' (expected one of: {})", name, known.join(", "))
    })?;
    let context = ViewContext::from_config(config)?;

    if image {
        println!("{}", render_image(view, &context));
    } else {
        println!("{}", render_frame(view, &context));
    }
    Ok(())
}
