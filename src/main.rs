mod fetch;
mod model;
mod parser;
mod view;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use model::ListDocument;

#[derive(Parser)]
#[command(name = "lister", about = "IMDb list scraper and exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one or more lists by id (e.g. ls080427652)
    Fetch {
        /// List ids
        #[arg(required = true)]
        ids: Vec<String>,
        #[command(flatten)]
        render: RenderOpts,
    },
    /// Fetch a single list or search page by full IMDb URL
    Url {
        url: String,
        #[command(flatten)]
        render: RenderOpts,
    },
    /// Parse an already-downloaded list page from disk
    Parse {
        file: PathBuf,
        #[command(flatten)]
        render: RenderOpts,
    },
}

#[derive(Args)]
struct RenderOpts {
    /// First rank to keep (1-based, inclusive)
    #[arg(long)]
    from: Option<usize>,
    /// Last rank to keep (inclusive)
    #[arg(long)]
    to: Option<usize>,
    /// Print the document as JSON instead of a table
    #[arg(long)]
    json: bool,
    /// Write <slug>.json into this directory
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch { ids, render } => {
            let (results, stats) = fetch::fetch_lists(&ids).await?;
            for fetched in results {
                match fetched.html {
                    Some(html) => {
                        let doc = parser::parse_list(&html);
                        render_list(&doc, &render)?;
                    }
                    None => eprintln!(
                        "{}: {}",
                        fetched.id,
                        fetched.error.as_deref().unwrap_or("unknown error")
                    ),
                }
            }
            if stats.total > 1 {
                println!("\n{} lists ({} ok, {} errors)", stats.total, stats.ok, stats.errors);
            }
            Ok(())
        }
        Commands::Url { url, render } => {
            let url = fetch::validate_list_url(&url)?;
            let client = fetch::client()?;
            let html = fetch::fetch_html(&client, &url).await?;
            let doc = parser::parse_list(&html);
            render_list(&doc, &render)
        }
        Commands::Parse { file, render } => {
            let html = std::fs::read_to_string(&file)?;
            let doc = parser::parse_list(&html);
            render_list(&doc, &render)
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn render_list(doc: &ListDocument, opts: &RenderOpts) -> Result<()> {
    let from = opts.from.unwrap_or(1);
    let to = opts.to.unwrap_or(doc.items.len());
    let filtered = view::filter_by_rank(doc, from, to);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&filtered)?);
    } else {
        print_table(&filtered);
    }

    if let Some(dir) = &opts.out {
        let path = view::write_json(&filtered, dir)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn print_table(doc: &ListDocument) {
    if !doc.title.is_empty() {
        println!("{}", doc.title);
    }
    if doc.items.is_empty() {
        println!("No items.");
        return;
    }

    println!(
        "{:>4} | {:<36} | {:<8} | {:>6} | {:<8} | {:<24}",
        "#", "Title", "Year", "Rating", "Runtime", "Genres"
    );
    println!("{}", "-".repeat(95));

    for item in &doc.items {
        let title = truncate(item.title.trim(), 36);
        let year = truncate(item.year.trim(), 8);
        let runtime = truncate(item.runtime.trim(), 8);
        let genres = truncate(&item.genres.join(", "), 24);
        let rating = if item.rating.is_finite() {
            format!("{:.1}", item.rating)
        } else {
            "-".to_string()
        };

        println!(
            "{:>4} | {:<36} | {:<8} | {:>6} | {:<8} | {:<24}",
            item.rank, title, year, rating, runtime, genres
        );
    }

    println!("\n{} items", doc.items.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
