//! Terminal rendering and prompts.

use std::io::{self, BufRead, Write};

use nyaa_core::TorrentResult;

/// Title column width; longer titles are truncated with an ellipsis.
const TITLE_WIDTH: usize = 50;

/// Print one page of results as a table.
pub fn print_results(window: &[TorrentResult]) {
    if window.is_empty() {
        println!("No results on this page.");
        return;
    }

    println!(
        "{:>3}  {:<title$} {:>10} {:>5} {:>5} {:>9}  {}",
        "#",
        "Title",
        "Size",
        "S",
        "L",
        "Downloads",
        "Date",
        title = TITLE_WIDTH
    );
    println!("{:-<100}", "");

    for (idx, result) in window.iter().enumerate() {
        println!(
            "{:>3}  {:<title$} {:>10} {:>5} {:>5} {:>9}  {}",
            idx + 1,
            truncate_title(&result.title, TITLE_WIDTH),
            result.size,
            result.seeders,
            result.leechers,
            result.downloads,
            result.date,
            title = TITLE_WIDTH
        );
    }
}

/// Print the pagination footer.
pub fn print_pagination(current_page: usize, total_pages: usize, total_results: usize) {
    println!("\nPage {current_page} of {total_pages} (Total results: {total_results})");
}

/// Print the navigation command reference.
pub fn print_navigation_help() {
    println!("Navigation commands:");
    println!("  n - Next page");
    println!("  p - Previous page");
    println!("  d - Download (you'll be prompted for the number)");
    println!("  h - Show this help");
    println!("  q - Quit to the shell");
    println!("Downloads are saved to the configured downloads directory.");
}

/// Print the detail view for a single torrent.
pub fn print_detail(result: &TorrentResult) {
    println!("\nTorrent details");
    println!("{:-<60}", "");
    println!("Title:     {}", result.title);
    println!("Category:  {}", result.category);
    println!("Size:      {}", result.size);
    println!("Date:      {}", result.date);
    println!("Seeders:   {}", result.seeders);
    println!("Leechers:  {}", result.leechers);
    println!("Downloads: {}", result.downloads);
}

/// Prompt on stdout and read one line from stdin.
pub fn prompt(message: &str) -> io::Result<String> {
    print!("{message}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// Progress callback that redraws a single status line.
pub fn progress_printer() -> impl FnMut(u64, Option<u64>) {
    |received, total| {
        match total {
            Some(total) if total > 0 => {
                let percent = received * 100 / total;
                print!("\rDownloading... {percent}% ({received}/{total} bytes)");
            }
            _ => print!("\rDownloading... {received} bytes"),
        }
        let _ = io::stdout().flush();
    }
}

/// Truncate a title to `width` characters, ellipsized.
fn truncate_title(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        return title.to_string();
    }
    let truncated: String = title.chars().take(width.saturating_sub(3)).collect();
    format!("{truncated}...")
}
