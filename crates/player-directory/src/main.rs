//! `players` - query a sample player directory from the command line.
//!
//! ```text
//! players --segment VIP --active-days 30 --page 1 --size 5
//! RUST_LOG=specula=trace players --min-level 20
//! ```

use anyhow::Result;
use clap::Parser;
use player_directory::specs::{ActiveWithin, EmailIs, InSegment, MinimumLevel};
use player_directory::{DirectoryConfig, Player, PlayerRepository, Status};
use specula::{Spec, Specification, Timestamp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "players", about = "Query a sample player directory")]
struct Cli {
    /// Only players in this segment
    #[arg(long)]
    segment: Option<String>,

    /// Only players seen within this many days
    #[arg(long)]
    active_days: Option<i64>,

    /// Only players at or above this level
    #[arg(long)]
    min_level: Option<u32>,

    /// Only the player with this email
    #[arg(long)]
    email: Option<String>,

    /// 1-based page number
    #[arg(long)]
    page: Option<usize>,

    /// Page size (defaults to the configured size)
    #[arg(long)]
    size: Option<usize>,

    /// YAML file with pagination limits
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => DirectoryConfig::from_path(path)?,
        None => DirectoryConfig::default(),
    };
    let repo = PlayerRepository::with_players(sample_players(Timestamp::now()), config);

    let mut spec = Spec::<Player>::all();
    if let Some(segment) = &cli.segment {
        spec = Spec::from_specification(&spec.and(InSegment::new(segment)?));
    }
    if let Some(days) = cli.active_days {
        spec = Spec::from_specification(&spec.and(ActiveWithin::new(days)?));
    }
    if let Some(level) = cli.min_level {
        spec = Spec::from_specification(&spec.and(MinimumLevel::new(level)?));
    }
    if let Some(email) = &cli.email {
        spec = Spec::from_specification(&spec.and(EmailIs::new(email)?));
    }
    let spec = spec.order_by_descending(Player::LEVEL).then_by(Player::ID);

    let total = repo.count(&spec)?;
    let page = repo.list(&spec, cli.page, cli.size)?;

    println!("{} of {} matching players", page.len(), total);
    for player in page {
        println!(
            "{:>4}  {:<24} {:<8} lvl {:>3}  {:?}",
            player.id, player.email, player.segment, player.level, player.status
        );
    }
    Ok(())
}

fn sample_players(now: Timestamp) -> Vec<Player> {
    let segments = ["VIP", "Regular", "Trial"];
    (1..=24u64)
        .map(|id| {
            let segment = segments[(id % 3) as usize];
            let status = if id % 7 == 0 {
                Status::Suspended
            } else {
                Status::Active
            };
            Player::new(
                id,
                format!("player{id}@example.com"),
                segment,
                now.minus_days((id * 3) as i64),
            )
            .with_level((id * 37 % 60) as u32 + 1)
            .with_status(status)
        })
        .collect()
}
