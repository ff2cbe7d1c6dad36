//! Encore CLI - music discovery from the terminal

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;

use api::{AddFavoriteRequest, EncoreClient, RecommendationResponse};
use config::Config;

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Encore CLI - AI music discovery", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store an access token
    Login {
        /// Access token (will prompt if not provided)
        #[arg(short, long)]
        token: Option<String>,
        /// API base URL
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show current configuration
    Config,

    /// Get recommendations for a mood or situation
    Discover {
        /// What you want to listen to
        text: Vec<String>,
    },

    /// List past recommendations
    History {
        /// Max entries (1-50)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show one recommendation
    Show {
        /// Recommendation ID
        id: String,
    },

    /// Rate a recommendation
    Rate {
        /// Recommendation ID
        id: String,
        /// Satisfaction (1-5)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
    },

    /// Search the catalog
    Search {
        /// Search query
        query: Vec<String>,
        /// Max results
        #[arg(short, long, default_value = "10")]
        limit: u32,
    },

    /// Favorite tracks
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites, newest first
    List {
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },
    /// Save a track
    Add {
        /// Catalog track ID
        track_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        artist: Option<String>,
    },
    /// Remove a track
    Remove {
        /// Catalog track ID
        track_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { token, base_url } => cmd_login(token, base_url).await,
        Commands::Config => cmd_config(),
        Commands::Discover { text } => cmd_discover(text.join(" ")).await,
        Commands::History { limit } => cmd_history(limit).await,
        Commands::Show { id } => cmd_show(&id).await,
        Commands::Rate { id, rating } => cmd_rate(&id, rating).await,
        Commands::Search { query, limit } => cmd_search(query.join(" "), limit).await,
        Commands::Favorites { action } => cmd_favorites(action).await,
    }
}

fn client() -> Result<EncoreClient> {
    let config = Config::load()?;
    let token = config.require_token()?;
    Ok(EncoreClient::new(&config.base_url, token))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(token: Option<String>, base_url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(url) = base_url {
        config.set_base_url(&url);
    }

    let token = match token {
        Some(t) => t,
        None => Password::new()
            .with_prompt("Access token")
            .interact()
            .context("Failed to read access token")?,
    };

    let client = EncoreClient::new(&config.base_url, &token);
    print!("Testing connection... ");

    if let Err(err) = client.verify_token().await {
        println!("{}", "Failed".red());
        bail!("Token check against {} failed: {:#}", config.base_url, err);
    }
    println!("{}", "OK".green());

    config.set_token(token);
    config.save()?;

    println!("{} Token saved to {:?}", "✓".green(), Config::config_path()?);
    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  Token: {}",
        if config.token.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );

    Ok(())
}

async fn cmd_discover(text: String) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Describe what you want to listen to, e.g. encore discover rainy day jazz");
    }

    let client = client()?;
    let recommendation = client.discover(&text).await?;
    print_recommendation(&recommendation);
    Ok(())
}

async fn cmd_history(limit: Option<u32>) -> Result<()> {
    let client = client()?;
    let entries = client.history(limit).await?;

    if entries.is_empty() {
        println!("No recommendations yet.");
        return Ok(());
    }

    println!("{}", "History:".bold());
    for entry in entries {
        let rating = entry
            .satisfaction_rating
            .map(|r| format!("★{}", r).yellow().to_string())
            .unwrap_or_default();

        println!(
            "  {} {} {} ({} tracks) {}",
            entry.id.to_string().dimmed(),
            entry.created_at.format("%Y-%m-%d").to_string().dimmed(),
            truncate_string(&entry.user_input, 50).cyan(),
            entry.recommendations_count,
            rating
        );
    }

    Ok(())
}

async fn cmd_show(id: &str) -> Result<()> {
    let client = client()?;
    let recommendation = client.get_recommendation(id).await?;
    print_recommendation(&recommendation);
    Ok(())
}

async fn cmd_rate(id: &str, rating: u8) -> Result<()> {
    let client = client()?;
    client.rate(id, rating).await?;
    println!("{} Rated {}", "✓".green(), "★".repeat(rating as usize).yellow());
    Ok(())
}

async fn cmd_search(query: String, limit: u32) -> Result<()> {
    let client = client()?;
    let tracks = client.search_tracks(&query, limit).await?;

    if tracks.is_empty() {
        println!("No tracks found for '{}'", query);
        return Ok(());
    }

    for track in tracks {
        println!(
            "  {} {} - {} {}",
            track.id.dimmed(),
            track.name.cyan().bold(),
            track.artists.join(", "),
            track.album_name.unwrap_or_default().dimmed()
        );
    }

    Ok(())
}

async fn cmd_favorites(action: FavoritesAction) -> Result<()> {
    let client = client()?;

    match action {
        FavoritesAction::List { page, limit } => {
            let result = client.list_favorites(page, limit).await?;

            if result.favorites.is_empty() {
                println!("No favorites yet.");
                return Ok(());
            }

            println!(
                "{} (page {}/{}, {} total)",
                "Favorites:".bold(),
                result.pagination.page,
                result.pagination.pages,
                result.pagination.total
            );
            for favorite in result.favorites {
                println!(
                    "  {} {} - {} {}",
                    favorite.catalog_track_id.dimmed(),
                    favorite.track_name.as_deref().unwrap_or("?").cyan(),
                    favorite.artist_name.as_deref().unwrap_or("?"),
                    favorite.created_at.format("%Y-%m-%d").to_string().dimmed()
                );
            }
        }

        FavoritesAction::Add {
            track_id,
            name,
            artist,
        } => {
            let favorite = client
                .add_favorite(&AddFavoriteRequest {
                    catalog_track_id: track_id,
                    track_name: name,
                    artist_name: artist,
                })
                .await?;
            println!(
                "{} Saved {} ({})",
                "✓".green(),
                favorite.catalog_track_id.cyan(),
                favorite.id.to_string().dimmed()
            );
        }

        FavoritesAction::Remove { track_id } => {
            client.remove_favorite(&track_id).await?;
            println!("{} Removed {}", "✓".green(), track_id.cyan());
        }
    }

    Ok(())
}

fn print_recommendation(recommendation: &RecommendationResponse) {
    println!(
        "{} {}",
        "For:".bold(),
        recommendation.user_input.cyan()
    );
    println!(
        "{}",
        format!(
            "{} · {}",
            recommendation.id,
            recommendation.created_at.format("%Y-%m-%d %H:%M")
        )
        .dimmed()
    );
    if let Some(rating) = recommendation.satisfaction_rating {
        println!("Rated {}", "★".repeat(rating as usize).yellow());
    }

    if recommendation.recommendations.is_empty() {
        println!("\nNo tracks could be matched in the catalog.");
        return;
    }

    for (i, track) in recommendation.recommendations.iter().enumerate() {
        println!(
            "\n{:>2}. {} - {}",
            i + 1,
            track.track_name.cyan().bold(),
            track.artist_name
        );
        if let Some(album) = &track.album_name {
            println!("    {}", album.dimmed());
        }
        if let Some(why) = &track.explanation {
            println!("    {}", truncate_string(why, 100));
        }
        if let Some(url) = &track.catalog_url {
            println!("    {}", url.dimmed());
        }
        println!("    {}", track.catalog_track_id.dimmed());
    }
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}
