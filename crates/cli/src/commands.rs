//! CLI command implementations.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use regex_lite::Regex;
use tracing::debug;

use nyaa_core::{
    normalize, Config, NyaaApi, ResultPager, SearchParams, SortField, SortOrder, TorrentDownloader,
    TorrentIndex, TorrentResult, UserParams,
};

use crate::render;

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search for torrents
    Search {
        /// Search query
        query: String,
        /// Subcategory filter (e.g. "eng" for English-translated)
        #[arg(short = 's', long, default_value = "eng")]
        subcategory: String,
        /// Sort results by: id, seeders, leechers, size, downloads
        #[arg(short = 'S', long)]
        sort: Option<String>,
        /// Sort order: asc or desc
        #[arg(short = 'o', long, default_value = "desc")]
        order: String,
        /// Results per page (default from config)
        #[arg(short = 'p', long)]
        page_size: Option<usize>,
    },
    /// Search for torrents by uploader username
    User {
        /// Username to search for
        username: String,
        /// Optional search query within the user's uploads
        #[arg(short = 'q', long)]
        query: Option<String>,
        /// Subcategory filter
        #[arg(short = 's', long, default_value = "eng")]
        subcategory: String,
        /// Results per page (default from config)
        #[arg(short = 'p', long)]
        page_size: Option<usize>,
    },
    /// View details for a specific torrent by URL or id
    View {
        /// nyaa.si view URL (https://nyaa.si/view/ID) or numeric torrent id
        url_or_id: String,
    },
}

/// Handle the CLI command.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Search {
            query,
            subcategory,
            sort,
            order,
            page_size,
        } => {
            search(config, query, subcategory, sort, order, page_size).await
        }
        Commands::User {
            username,
            query,
            subcategory,
            page_size,
        } => user(config, username, query, subcategory, page_size).await,
        Commands::View { url_or_id } => view(config, url_or_id).await,
    }
}

/// Search for torrents and enter the interactive result browser.
async fn search(
    config: &Config,
    query: String,
    subcategory: String,
    sort: Option<String>,
    order: String,
    page_size: Option<usize>,
) -> Result<()> {
    let sort = sort
        .as_deref()
        .map(str::parse::<SortField>)
        .transpose()
        .map_err(anyhow::Error::msg)?;
    let order: SortOrder = order.parse().map_err(anyhow::Error::msg)?;
    let page_size = effective_page_size(page_size, config)?;

    let index = NyaaApi::new(&config.api);
    let mut params = SearchParams::new(query.clone());
    params.subcategory = Some(subcategory);
    params.sort = sort;
    params.order = order;

    println!("Searching for \"{query}\"...");
    let raw = index.search(&params).await.context("Search request failed")?;
    let results = normalize(&raw);
    debug!(query = %query, results = results.len(), "Search returned");

    let mut pager = ResultPager::new();
    pager.cache_results(query, results.clone());
    pager.reset_pagination();

    browse_results(config, &mut pager, &results, page_size).await
}

/// Search a user's uploads and enter the interactive result browser.
async fn user(
    config: &Config,
    username: String,
    query: Option<String>,
    subcategory: String,
    page_size: Option<usize>,
) -> Result<()> {
    let page_size = effective_page_size(page_size, config)?;

    let index = NyaaApi::new(&config.api);
    let params = UserParams {
        query,
        category: None,
        subcategory: Some(subcategory),
    };

    println!("Searching for torrents by {username}...");
    let raw = index
        .by_user(&username, &params)
        .await
        .context("User search request failed")?;
    let results = normalize(&raw);
    debug!(username = %username, results = results.len(), "User search returned");

    let mut pager = ResultPager::new();
    pager.cache_results(format!("user:{username}"), results.clone());
    pager.reset_pagination();

    browse_results(config, &mut pager, &results, page_size).await
}

/// View details for one torrent, offering to download it.
async fn view(config: &Config, url_or_id: String) -> Result<()> {
    let id = extract_torrent_id(&url_or_id)?;

    let index = NyaaApi::new(&config.api);
    println!("Fetching torrent details...");
    let raw = index
        .by_id(&id)
        .await
        .context("Failed to fetch torrent details")?;

    let results = normalize(&raw);
    let Some(result) = results.first() else {
        println!("No torrent found with id {id}.");
        return Ok(());
    };

    render::print_detail(result);

    if result.download_link.is_empty() {
        println!("Download link not available.");
        return Ok(());
    }

    let answer = render::prompt("Download this torrent? [y/N]")?;
    if answer.trim().eq_ignore_ascii_case("y") {
        download(config, &result.title, &result.download_link).await?;
    }

    Ok(())
}

/// Interactive page navigation loop shared by `search` and `user`.
async fn browse_results(
    config: &Config,
    pager: &mut ResultPager,
    results: &[TorrentResult],
    page_size: usize,
) -> Result<()> {
    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    loop {
        let window = pager.render_page(results, page_size);
        render::print_results(window);
        render::print_pagination(
            pager.current_page(),
            ResultPager::page_count(results.len(), page_size),
            results.len(),
        );

        let command = render::prompt("Command [n]ext [p]rev [d]ownload [h]elp [q]uit")?;
        match command.trim() {
            "q" | "" => break,
            "n" => pager.next_page(),
            "p" => pager.previous_page(),
            "h" => render::print_navigation_help(),
            "d" => download_selection(config, pager).await?,
            other => println!("Unknown command: {other}"),
        }
    }

    Ok(())
}

/// Prompt for an ordinal and download the matching entry from the current
/// page. Out-of-range or non-numeric input is reported, never fatal.
async fn download_selection(config: &Config, pager: &ResultPager) -> Result<()> {
    let input = render::prompt("Enter the number of the torrent to download")?;
    let Ok(ordinal) = input.trim().parse::<usize>() else {
        println!("Invalid input. Please enter a number.");
        return Ok(());
    };

    match pager.resolve_selection(ordinal) {
        Some((title, link)) if !link.is_empty() => {
            println!("Selected: {title}");
            download(config, &title, &link).await
        }
        Some((title, _)) => {
            println!("Download link not available for: {title}");
            Ok(())
        }
        None => {
            println!("Invalid selection. Please choose a number from the list.");
            Ok(())
        }
    }
}

/// Download one torrent file, reporting progress to the terminal.
async fn download(config: &Config, title: &str, link: &str) -> Result<()> {
    let downloader = TorrentDownloader::new(&config.download);
    let path = downloader
        .download(link, title, render::progress_printer())
        .await
        .context("Download failed")?;
    println!("\nSuccessfully downloaded to: {}", path.display());
    Ok(())
}

/// Resolve the page size from the CLI flag or the config default, rejecting
/// zero before it can reach the pager.
fn effective_page_size(flag: Option<usize>, config: &Config) -> Result<usize> {
    let page_size = flag.unwrap_or(config.display.page_size);
    if page_size == 0 {
        bail!("page size must be at least 1");
    }
    Ok(page_size)
}

/// Extract a torrent id from a nyaa.si view URL, or accept a bare id.
fn extract_torrent_id(url_or_id: &str) -> Result<String> {
    let url_pattern =
        Regex::new(r"^https?://nyaa\.si/view/(\d+)/?$").expect("valid literal regex");
    if let Some(captures) = url_pattern.captures(url_or_id) {
        if let Some(id) = captures.get(1) {
            return Ok(id.as_str().to_string());
        }
    }

    if !url_or_id.is_empty() && url_or_id.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(url_or_id.to_string());
    }

    bail!(
        "Invalid format '{url_or_id}': provide either a nyaa.si URL (https://nyaa.si/view/ID) or just the id number"
    )
}
