use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vegancity_application::prelude as flows;
use vegancity_core::{entities::*, repositories::*, usecases};
use vegancity_db_sqlite as sqlite;
use vegancity_db_tantivy as tantivy;

use crate::{config::Config, gateways};

#[derive(Parser, Debug)]
#[command(name = "vegancity", about = "Vegan-friendly vendors and their reviews", version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// URL to the database
    #[arg(long, value_name = "DATABASE_URL")]
    db_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search approved vendors by address, name, tags and reviews
    Search {
        query: String,
    },
    /// Pick a random approved vendor that has not been reviewed yet
    Unreviewed,
    /// List vendors and reviews that await moderation
    Pending,
    /// Show a vendor with its average ratings
    Show {
        vendor_id: String,
    },
    /// Change the approval status of a vendor
    ModerateVendor {
        id: String,
        #[arg(value_parser = parse_status)]
        status: ApprovalStatus,
    },
    /// Change the approval status of a review
    ModerateReview {
        id: String,
        #[arg(value_parser = parse_status)]
        status: ApprovalStatus,
    },
    /// Rebuild the full-text search index from the database
    Reindex,
}

fn parse_status(s: &str) -> Result<ApprovalStatus> {
    s.parse()
        .map_err(|_| anyhow!("Expected one of 'pending', 'approved' or 'quarantined'"))
}

pub fn run() -> Result<()> {
    let Cli {
        config,
        db_url,
        command,
    } = Cli::parse();

    let mut cfg = Config::try_load_from_file_or_default(config.as_ref())?;
    if let Some(db_url) = db_url {
        cfg.db.conn_sqlite = db_url;
    }

    log::info!(
        "Connecting to SQLite database '{}' (pool size = {})",
        cfg.db.conn_sqlite,
        cfg.db.conn_pool_size
    );
    let connections = sqlite::Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size)?;

    log::info!("Running embedded database migrations");
    sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    log::info!("Initializing Tantivy full-text search engine");
    let mut search_engine = tantivy::SearchEngine::init_with_path(cfg.db.index_dir.as_ref())?;

    if search_engine.num_docs() == 0 && !matches!(command, Command::Reindex) {
        log::info!("Building the empty search index");
        let count = flows::reindex_all(&connections, &mut search_engine)?;
        log::info!("Indexed {count} document(s)");
    }

    let geo = gateways::geocoding_gateway(&cfg);

    match command {
        Command::Search { query } => {
            let vendors = flows::search_vendors(&connections, &geo, &search_engine, &query, None)?;
            if vendors.is_empty() {
                println!("No vendors found");
            }
            for vendor in vendors {
                print_vendor(&vendor);
            }
        }
        Command::Unreviewed => {
            match flows::random_unreviewed_vendor(&connections, &mut rand::thread_rng())? {
                Some(vendor) => print_vendor(&vendor),
                None => println!("Every approved vendor has been reviewed"),
            }
        }
        Command::Pending => {
            let (vendors, reviews) = flows::pending_submissions(&connections)?;
            println!("{} pending vendor(s)", vendors.len());
            for vendor in vendors {
                print_vendor(&vendor);
            }
            println!("{} pending review(s)", reviews.len());
            for review in reviews {
                print_review(&review);
            }
        }
        Command::Show { vendor_id } => {
            let db = connections.shared()?;
            let vendor = db.get_vendor(&vendor_id)?;
            let AvgRatings { food, atmosphere } = usecases::vendor_ratings(&db, &vendor_id)?;
            print_vendor(&vendor);
            println!("  food rating       : {}", format_rating(food));
            println!("  atmosphere rating : {}", format_rating(atmosphere));
        }
        Command::ModerateVendor { id, status } => {
            let notify = gateways::notification_gateway(&cfg)?;
            let vendor = flows::change_vendor_status(
                &connections,
                &mut search_engine,
                &geo,
                &notify,
                &id,
                status,
            )?;
            print_vendor(&vendor);
        }
        Command::ModerateReview { id, status } => {
            let review =
                flows::change_review_status(&connections, &mut search_engine, &id, status)?;
            print_review(&review);
        }
        Command::Reindex => {
            let count = flows::reindex_all(&connections, &mut search_engine)?;
            println!("Indexed {count} document(s)");
        }
    }
    Ok(())
}

fn format_rating(rating: Option<RatingValue>) -> String {
    rating.map_or_else(|| "-".to_string(), |r| r.as_u8().to_string())
}

fn print_vendor(vendor: &Vendor) {
    let Vendor {
        id,
        name,
        address,
        approval_status,
        ..
    } = vendor;
    match address {
        Some(address) => println!("{id} [{approval_status}] {name}, {address}"),
        None => println!("{id} [{approval_status}] {name}"),
    }
}

fn print_review(review: &Review) {
    let Review {
        id,
        vendor_id,
        approval_status,
        title,
        ..
    } = review;
    let title = title.as_deref().unwrap_or("(untitled)");
    println!("{id} [{approval_status}] {title} (vendor {vendor_id})");
}
