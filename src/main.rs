use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rally_ledger::api::state::AppState;
use rally_ledger::calculate::{
    adjusted_points, aggregate_partners, most_effective_partner, rankings, rivalries, set_win_pct,
    win_streak,
};
use rally_ledger::config::{AppConfig, RankingConfig};
use rally_ledger::models::{generate_match_id, RawMatchRow};
use rally_ledger::normalize;
use rally_ledger::storage::{JsonlReader, JsonlWriter, StorageConfig};

#[derive(Parser)]
#[command(name = "rally-ledger")]
#[command(about = "Tennis group match tracker with ranking analytics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the current standings table
    Rankings,

    /// Print partner statistics, optionally for one player
    Partners {
        /// Player name
        #[arg(long)]
        player: Option<String>,
    },

    /// Print derived insights for one player
    Insights {
        /// Player name
        player: String,
    },

    /// Print the top rivalries by matches played
    Rivalries {
        /// How many pairs to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Record a match result
    AddMatch {
        /// Match date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Team 1 players, comma-separated (1 or 2 names)
        #[arg(long)]
        team1: String,

        /// Team 2 players, comma-separated (1 or 2 names)
        #[arg(long)]
        team2: String,

        /// Set scores, comma-separated (e.g. "6-3,6-4")
        #[arg(long, default_value = "")]
        sets: String,

        /// Winner: Team1, Team2 or Tie
        #[arg(long)]
        winner: String,
    },
}

fn load_config(cli: &Cli) -> AppConfig {
    let path = PathBuf::from(&cli.config);
    let mut config = if path.exists() {
        match AppConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", cli.config, e);
                std::process::exit(2);
            }
        }
    } else {
        AppConfig::default()
    };

    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = PathBuf::from(data_dir);
    }
    config
}

fn split_names(s: &str) -> Vec<String> {
    s.split(',')
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(&cli);
    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(storage, config.ranking.clone());
            let app = rally_ledger::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }

        Commands::Rankings => {
            let matches = load_matches(&storage)?;
            let rows = rankings(&matches, config.ranking.trend_length);

            println!(
                "{:<4} {:<16} {:>6} {:>6} {:>4} {:>4} {:>4} {:>6} {:>8}  {}",
                "#", "Player", "Pts", "Win%", "MP", "W", "L", "Games", "Diff", "Form"
            );
            for row in &rows {
                println!(
                    "{:<4} {:<16} {:>6.1} {:>6.1} {:>4} {:>4} {:>4} {:>6} {:>+8.2}  {}",
                    row.rank,
                    row.player,
                    row.points,
                    row.win_pct,
                    row.matches_played,
                    row.wins,
                    row.losses,
                    row.games_won,
                    row.game_diff_avg,
                    row.recent_trend,
                );
            }
        }

        Commands::Partners { player } => {
            let matches = load_matches(&storage)?;
            let table = aggregate_partners(&matches);

            match player {
                Some(name) => {
                    match table.get(&name) {
                        Some(partners) => {
                            for (partner, rec) in partners {
                                println!(
                                    "{:<16} W{} L{} T{} ({} matches, diff {:+.1})",
                                    partner, rec.wins, rec.losses, rec.ties, rec.matches, rec.game_diff_sum
                                );
                            }
                            if let Some((best, rec)) = most_effective_partner(&table, &name) {
                                println!(
                                    "\nMost effective partner: {} ({:.0}% wins)",
                                    best,
                                    rec.win_ratio() * 100.0
                                );
                            }
                        }
                        None => println!("No doubles matches for {}", name),
                    }
                }
                None => {
                    for (player, partners) in &table {
                        for (partner, rec) in partners {
                            println!(
                                "{:<16} + {:<16} W{} L{} T{} ({} matches)",
                                player, partner, rec.wins, rec.losses, rec.ties, rec.matches
                            );
                        }
                    }
                }
            }
        }

        Commands::Insights { player } => {
            let matches = load_matches(&storage)?;
            let ranking_config: &RankingConfig = &config.ranking;
            let table = rankings(&matches, ranking_config.trend_length);
            let adjusted = adjusted_points(&matches, &table, ranking_config.strength_divisor);

            let trend =
                rally_ledger::calculate::recent_trend(&matches, &player, ranking_config.trend_length);
            println!("Player:          {}", player);
            println!("Recent form:     {}", if trend.is_empty() { "-" } else { &trend });
            println!("Win streak:      {}", win_streak(&matches, &player));
            println!("Set win pct:     {:.1}", set_win_pct(&matches, &player));
            println!(
                "Adjusted points: {:.2}",
                adjusted.get(&player).copied().unwrap_or(0.0)
            );
        }

        Commands::Rivalries { limit } => {
            let matches = load_matches(&storage)?;
            for rivalry in rivalries(&matches, limit) {
                println!(
                    "{} vs {}: {} matches ({}-{}-{})",
                    rivalry.player,
                    rivalry.opponent,
                    rivalry.record.matches,
                    rivalry.record.wins,
                    rivalry.record.losses,
                    rivalry.record.ties,
                );
            }
        }

        Commands::AddMatch {
            date,
            team1,
            team2,
            sets,
            winner,
        } => {
            let parsed_date = match normalize::parse_date(&date) {
                Some(d) => d,
                None => {
                    eprintln!("Invalid --date (expected YYYY-MM-DD): {}", date);
                    std::process::exit(2);
                }
            };
            if normalize::parse_winner(&winner).is_none() {
                eprintln!("Invalid --winner (expected Team1, Team2 or Tie): {}", winner);
                std::process::exit(2);
            }

            let team1 = split_names(&team1);
            let team2 = split_names(&team2);
            if !matches!((team1.len(), team2.len()), (1, 1) | (2, 2)) {
                eprintln!("Teams must both have 1 (singles) or 2 (doubles) players");
                std::process::exit(2);
            }

            let set_scores = split_names(&sets);
            if set_scores.len() > 3 {
                eprintln!("At most 3 sets per match");
                std::process::exit(2);
            }

            let raw = JsonlReader::<RawMatchRow>::new(storage.matches_path()).read_all()?;
            let existing_ids: Vec<&str> = raw.iter().map(|r| r.match_id.as_str()).collect();
            let match_id = generate_match_id(&existing_ids, parsed_date);

            let pick = |team: &[String], i: usize| team.get(i).cloned().unwrap_or_default();
            let row = RawMatchRow {
                match_id: match_id.clone(),
                date,
                match_type: if team1.len() == 2 { "Doubles" } else { "Singles" }.to_string(),
                team1_player1: pick(&team1, 0),
                team1_player2: pick(&team1, 1),
                team2_player1: pick(&team2, 0),
                team2_player2: pick(&team2, 1),
                set1: pick(&set_scores, 0),
                set2: pick(&set_scores, 1),
                set3: pick(&set_scores, 2),
                winner,
                image_url: String::new(),
            };

            JsonlWriter::<RawMatchRow>::new(storage.matches_path()).append(&row)?;
            println!("Recorded match {}", match_id);
        }
    }

    Ok(())
}

fn load_matches(storage: &StorageConfig) -> Result<Vec<rally_ledger::models::MatchRecord>> {
    let raw = JsonlReader::<RawMatchRow>::new(storage.matches_path()).read_all()?;
    Ok(normalize::normalize(&raw))
}
