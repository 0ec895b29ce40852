use clap::{Parser, Subcommand};
use tracing::info;

use opds2::providers::{InternetArchiveProvider, OpenLibraryProvider};
use opds2::{Catalog, DataProvider, SearchRequest};

#[derive(Parser)]
#[command(name = "opds2")]
#[command(about = "OPDS 2.0 catalog feed generator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a provider and print the resulting catalog document
    Search {
        /// Data provider to query. Available: open_library, internet_archive
        #[arg(long, default_value = "open_library")]
        provider: String,
        /// Search query; empty browses all results
        #[arg(long, default_value = "")]
        query: String,
        /// 1-indexed page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Results per page
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Backend sort parameter
        #[arg(long)]
        sort: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print a provider's root catalog document
    Catalog {
        /// Data provider. Available: open_library, internet_archive
        #[arg(long, default_value = "open_library")]
        provider: String,
        /// Catalog identifier; a urn:uuid is generated when omitted
        #[arg(long)]
        identifier: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn create_provider(name: &str) -> Option<Box<dyn DataProvider>> {
    match name {
        "open_library" => Some(Box::new(OpenLibraryProvider::new())),
        "internet_archive" => Some(Box::new(InternetArchiveProvider::new())),
        _ => None,
    }
}

fn absolute(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base.trim_end_matches('/'), path)
    } else {
        path.to_string()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    opds2::logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            provider,
            query,
            page,
            limit,
            sort,
            pretty,
        } => {
            let backend = create_provider(&provider)
                .ok_or_else(|| anyhow::anyhow!("unknown provider: {provider}"))?;

            let mut request = SearchRequest::new(query).with_limit(limit).with_page(page);
            if let Some(sort) = sort {
                request = request.with_sort(sort);
            }

            info!(provider = %provider, "running search");
            let response = backend.search(&request).await?;
            let catalog = Catalog::from_search(backend.as_ref(), &response)?;

            if pretty {
                println!("{}", catalog.to_json_pretty()?);
            } else {
                println!("{}", catalog.to_json()?);
            }
        }
        Commands::Catalog {
            provider,
            identifier,
            pretty,
        } => {
            let backend = create_provider(&provider)
                .ok_or_else(|| anyhow::anyhow!("unknown provider: {provider}"))?;

            let identifier =
                identifier.unwrap_or_else(|| format!("urn:uuid:{}", uuid::Uuid::new_v4()));
            let catalog = Catalog::builder()
                .title(backend.title())
                .identifier(identifier)
                .modified(chrono::Utc::now())
                .self_link(absolute(backend.base_url(), backend.catalog_url()))
                .search_link(absolute(backend.base_url(), backend.search_url()))
                .build()?;

            if pretty {
                println!("{}", catalog.to_json_pretty()?);
            } else {
                println!("{}", catalog.to_json()?);
            }
        }
    }

    Ok(())
}
