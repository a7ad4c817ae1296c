//! Terminal output: live progress, result tables, summary, and listings.

use colored::{ColoredString, Colorize};
use honeychow_scanner::{
    Bucket, ProgressReporter, RunningCounts, SearchResults, SiteResult, Summary,
};
use honeychow_sites::SiteCatalog;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} Checking [{bar:30.cyan/blue}] {pos}/{len} • {prefix:.cyan} • {msg} ({eta})";

/// Confidence at or above which a hit is shown as strong.
const STRONG_CONFIDENCE: u8 = 80;

pub fn ok_mark() -> ColoredString {
    "✔".green().bold()
}

pub fn warn_mark() -> ColoredString {
    "✘".yellow().bold()
}

pub fn error_mark() -> ColoredString {
    "✘".red().bold()
}

/// Spinner shown while the site database loads.
pub fn spinner(message: &str) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Reporter drawing a progress bar and one line per interesting result.
pub struct ConsoleReporter {
    quiet: bool,
    show_not_found: bool,
    show_failed: bool,
    bar: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new(quiet: bool, show_not_found: bool, show_failed: bool) -> Self {
        Self {
            quiet,
            show_not_found,
            show_failed,
            bar: None,
        }
    }

    /// Print above the bar without tearing it.
    fn line(&self, text: &str) {
        match &self.bar {
            Some(bar) => bar.suspend(|| println!("{text}")),
            None => println!("{text}"),
        }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn on_start(&mut self, username: &str, total: usize) {
        if self.quiet {
            return;
        }

        println!(
            "[{}] Searching for '{}' across {} sites...\n",
            "~".blue().bold(),
            username,
            total
        );

        let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");

        let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
        bar.set_style(style);
        bar.set_prefix("Initialising...");
        bar.set_message(counts_message(RunningCounts::default()));
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    fn on_result(&mut self, result: &SiteResult, bucket: Bucket, counts: RunningCounts) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
            bar.set_prefix(result.site_name.clone());
            bar.set_message(counts_message(counts));
        }

        if self.quiet {
            return;
        }

        match bucket {
            Bucket::Found => {
                self.line(&format!("[{}] {}: {}", ok_mark(), result.site_name, result.url));
            }
            Bucket::NotFound if self.show_not_found => {
                self.line(&format!(
                    "[{}] {}: {}",
                    warn_mark(),
                    result.site_name,
                    result.status_code
                ));
            }
            Bucket::Failed if self.show_failed => {
                self.line(&format!(
                    "[{}] {}: {}",
                    error_mark(),
                    result.site_name,
                    result.error.as_deref().unwrap_or("Unknown")
                ));
            }
            _ => {}
        }
    }

    fn on_no_match(&mut self, requested: &[String]) {
        println!(
            "{}",
            format!("No matching sites found for: {}", requested.join(", ")).red()
        );
    }

    fn on_finish(&mut self, _results: &SearchResults) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

fn counts_message(counts: RunningCounts) -> String {
    format!(
        "{}, {}, {}",
        format!("found={}", counts.found).green(),
        format!("not_found={}", counts.not_found).yellow(),
        format!("failed={}", counts.failed).red()
    )
}

/// Column alignment in a plain-text table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Widest cell per column, in characters.
fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);

    (0..columns)
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{cell:<width$}"),
        Align::Right => format!("{cell:>width$}"),
    }
}

/// Print rows as aligned columns; `style` colours a padded cell given its
/// row and column.
fn print_table(
    rows: &[Vec<String>],
    aligns: &[Align],
    style: impl Fn(usize, usize, String) -> ColoredString,
) {
    let widths = column_widths(rows);

    for (r, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, cell)| {
                let align = aligns.get(c).copied().unwrap_or(Align::Left);
                style(r, c, pad(cell, widths[c], align)).to_string()
            })
            .collect();
        println!(" {}", cells.join("   ").trim_end());
    }
}

fn confidence_label(confidence: u8) -> String {
    format!("{confidence}%")
}

/// Result tables for the requested buckets.
pub fn print_results(results: &SearchResults, show_not_found: bool, show_failed: bool) {
    if results.found.is_empty() {
        println!("\n[{}] No accounts found.", warn_mark());
    } else {
        println!(
            "\n{}",
            format!("Found {} accounts", results.found.len()).green().bold()
        );

        let rows: Vec<Vec<String>> = results
            .found
            .iter()
            .map(|r| {
                vec![
                    r.site_name.clone(),
                    r.category.clone(),
                    r.url.clone(),
                    confidence_label(r.confidence),
                ]
            })
            .collect();

        print_table(
            &rows,
            &[Align::Left, Align::Left, Align::Left, Align::Right],
            |row, column, padded| match column {
                1 => padded.yellow(),
                3 if results.found[row].confidence >= STRONG_CONFIDENCE => padded.green(),
                3 => padded.yellow(),
                _ => padded.normal(),
            },
        );
    }

    if show_not_found && !results.not_found.is_empty() {
        println!(
            "\n{}",
            format!("Not found on {} sites", results.not_found.len())
                .yellow()
                .bold()
        );

        let rows: Vec<Vec<String>> = results
            .not_found
            .iter()
            .map(|r| vec![r.site_name.clone(), r.category.clone(), r.status_code.to_string()])
            .collect();

        print_table(&rows, &[Align::Left, Align::Left, Align::Right], |_, column, padded| {
            if column == 1 {
                padded.yellow()
            } else {
                padded.normal()
            }
        });
    }

    if show_failed && !results.failed.is_empty() {
        println!(
            "\n{}",
            format!("Failed {} sites", results.failed.len()).red().bold()
        );

        let rows: Vec<Vec<String>> = results
            .failed
            .iter()
            .map(|r| {
                vec![
                    r.site_name.clone(),
                    r.category.clone(),
                    r.error.clone().unwrap_or_else(|| "Unknown".to_string()),
                ]
            })
            .collect();

        print_table(&rows, &[Align::Left, Align::Left, Align::Left], |_, column, padded| {
            match column {
                1 => padded.yellow(),
                2 => padded.red(),
                _ => padded.normal(),
            }
        });
    }
}

/// Totals, success rate, and the found-by-category breakdown.
pub fn print_summary(username: &str, summary: &Summary) {
    println!("\n{}", "━━━━━━━━━━━━━ Summary ━━━━━━━━━━━━━".bold());
    println!("{} '{}'", "Username:".bold(), username);
    println!("{} {}", "Total sites checked:".bold(), summary.total);
    println!();
    println!("[{}] Found: {}", ok_mark(), summary.found);
    println!("[{}] Not found: {}", warn_mark(), summary.not_found);
    println!("[{}] Failed: {}", error_mark(), summary.failed);
    println!();
    println!(
        "{} {}% ({}/{})",
        "Success rate:".bold(),
        summary.success_rate,
        summary.found,
        summary.checked
    );

    if !summary.by_category.is_empty() {
        println!("\n{}", "Found by category:".bold());

        let rows: Vec<Vec<String>> = summary
            .by_category
            .iter()
            .map(|(category, count)| vec![category.clone(), count.to_string()])
            .collect();

        print_table(&rows, &[Align::Right, Align::Left], |_, column, padded| {
            if column == 0 {
                padded.yellow()
            } else {
                padded.normal()
            }
        });
    }
}

/// Every site with its category, sorted by name.
pub fn print_sites(catalog: &SiteCatalog) {
    println!("\n{}", "Available sites".bold());

    let rows: Vec<Vec<String>> = catalog
        .sorted_by_name()
        .into_iter()
        .map(|site| vec![site.name.clone(), site.category.clone()])
        .collect();

    print_table(&rows, &[Align::Left, Align::Left], |_, column, padded| {
        if column == 0 {
            padded.cyan()
        } else {
            padded.magenta()
        }
    });

    println!("\n{}", format!("Total: {} sites", catalog.len()).bold());
}

/// Every category with its site count, sorted by category.
pub fn print_categories(catalog: &SiteCatalog) {
    println!("\n{}", "Available categories".bold());

    let rows: Vec<Vec<String>> = catalog
        .category_counts()
        .into_iter()
        .map(|(category, count)| vec![category, count.to_string()])
        .collect();

    print_table(&rows, &[Align::Left, Align::Right], |_, column, padded| {
        if column == 0 {
            padded.cyan()
        } else {
            padded.green()
        }
    });
}
