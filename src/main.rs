#![cfg(not(tarpaulin_include))]

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tokio::time::{self, Instant};

use undangan::app::{self, ServerConfig};
use undangan::content::InvitationContent;
use undangan::countdown::{COUNTDOWN_INTERVAL_MS, Countdown, CountdownState};
use undangan::guest::GuestName;
use undangan::page::{PageRenderer, PageVariant};
use undangan::widget::{MountedCountdown, SystemClock};

const PRINT_LAG: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "undangan", version, about = "Personalized wedding invitation page")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the invitation over HTTP
    Serve {
        #[arg(long, env = "UNDANGAN_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
        /// JSON file overriding the built-in content
        #[arg(long, env = "UNDANGAN_CONTENT")]
        content: Option<PathBuf>,
        #[arg(long, env = "UNDANGAN_ASSETS", default_value = "assets")]
        assets: PathBuf,
        /// Output directory of wasm-pack
        #[arg(long, default_value = "pkg")]
        pkg: PathBuf,
    },
    /// Write the page for one guest as a static HTML file
    Render {
        /// Guest name, as it would appear after `?to=`
        #[arg(long)]
        to: Option<String>,
        #[arg(long, env = "UNDANGAN_CONTENT")]
        content: Option<PathBuf>,
        /// Skip the cover screen
        #[arg(long)]
        main: bool,
        /// Output file, stdout when omitted
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Print the countdown in the terminal once per second
    Countdown {
        #[arg(long, env = "UNDANGAN_CONTENT")]
        content: Option<PathBuf>,
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Serve {
            bind,
            content,
            assets,
            pkg,
        } => {
            let content = InvitationContent::load_or_default(content.as_deref())?;
            let config = ServerConfig {
                bind,
                assets_dir: assets,
                pkg_dir: pkg,
            };
            app::run(content, config).await
        }
        Command::Render {
            to,
            content,
            main,
            out,
        } => {
            let content = InvitationContent::load_or_default(content.as_deref())?;
            let guest = GuestName::from_param(to.as_deref(), &content.default_guest);
            let variant = if main { PageVariant::Main } else { PageVariant::Cover };

            let html = PageRenderer::new()?.render(&content, &guest, variant, Utc::now())?;
            match out {
                Some(path) => {
                    fs::write(&path, html)?;
                    log::info!("wrote invitation for {} to {}", guest, path.display());
                }
                None => println!("{}", html),
            }
            Ok(())
        }
        Command::Countdown { content, ticks } => {
            let content = InvitationContent::load_or_default(content.as_deref())?;
            run_countdown(&content, ticks).await;
            Ok(())
        }
    }
}

fn print_countdown(content: &InvitationContent, mounted: &MountedCountdown) {
    match mounted.snapshot() {
        CountdownState::Counting(_) => {
            let line: Vec<String> = mounted
                .display_fields()
                .into_iter()
                .map(|(label, value)| format!("{} {}", value, label))
                .collect();
            println!("{}", line.join("  "));
        }
        CountdownState::Arrived => println!("{}", content.countdown.arrived_text),
    }
}

async fn run_countdown(content: &InvitationContent, ticks: Option<u64>) {
    let countdown = Countdown::new(content.countdown_target(), Utc::now());
    let mounted = MountedCountdown::mount(countdown, SystemClock);
    println!("{}", content.countdown.heading);
    print_countdown(content, &mounted);

    let period = Duration::from_millis(COUNTDOWN_INTERVAL_MS);
    // print just after the widget's own tick
    let mut interval = time::interval_at(Instant::now() + period + PRINT_LAG, period);
    let mut seen = 0;
    while mounted.snapshot() != CountdownState::Arrived && ticks.is_none_or(|limit| seen < limit) {
        interval.tick().await;
        print_countdown(content, &mounted);
        seen += 1;
    }

    mounted.unmount();
}
