use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use interlinker_core::report::{render_discovery_report, render_interlink_report, save_report};
use interlinker_core::{InterlinkReport, ReportFormat, TargetSet, UrlDiscovery, find_interlinks};
use interlinker_scanner::{CategoryFilter, Crawler, PageCategory, ProgressCallback, ScanConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

// Helper functions for the check and discover handlers

/// Parse a single line as a homepage URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // Try to parse as-is
    if let Ok(parsed) = Url::parse(line) {
        if matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some() {
            return Some(line.to_string());
        }
    }

    // Try adding http://
    let with_scheme = format!("http://{}", line);
    if let Ok(parsed) = Url::parse(&with_scheme) {
        if parsed.host_str().is_some_and(|host| !host.is_empty()) {
            return Some(with_scheme);
        }
    }

    eprintln!("⚠️  Skipping invalid URL '{}'", line);
    None
}

/// Load target URLs from a file; targets may be separated by newlines or commas
pub fn load_targets_from_file(path: &Path) -> Result<TargetSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read targets file {}", path.display()))?;

    let targets = TargetSet::parse(&content);
    if targets.is_empty() {
        bail!("No target URLs found in {}", path.display());
    }

    Ok(targets)
}

/// Combine `--targets` values and a `--targets-file` into one ordered target set
pub fn load_targets_from_source(inline: &[String], targets_file: Option<&PathBuf>) -> Result<TargetSet> {
    let mut targets = TargetSet::default();

    for text in inline {
        for target in text.split([',', '\n']) {
            targets.insert(target);
        }
    }

    if let Some(path) = targets_file {
        for target in load_targets_from_file(path)?.iter() {
            targets.insert(target);
        }
    }

    if targets.is_empty() {
        bail!("Please enter at least one target URL (--targets or --targets-file)");
    }

    Ok(targets)
}

/// Pick the page filter: custom keywords win over the named category
pub fn resolve_filter(category: Option<&String>, keywords: &[String]) -> Result<CategoryFilter> {
    if !keywords.is_empty() {
        return Ok(CategoryFilter::from_keywords(keywords));
    }

    match category {
        Some(name) => name
            .parse::<PageCategory>()
            .map(|category| category.filter())
            .map_err(anyhow::Error::msg),
        None => Ok(CategoryFilter::AllPages),
    }
}

/// Path component of a URL for compact progress display
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path();
            if path.is_empty() { "/".to_string() } else { path.to_string() }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Install the stderr log subscriber; RUST_LOG takes precedence over `--verbose`
pub fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "warn,interlinker_scanner=debug,interlinker_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn print_banner() {
    print_divider();
    println!("{}", "  INTERLINKER".bright_white().bold());
    println!(
        "  {}",
        format!("v{} - internal link checker", env!("CARGO_PKG_VERSION")).bright_black()
    );
    print_divider();
    println!();
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "✗".red().bold(), message);
    std::process::exit(1);
}

fn crawl_spinner(quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

fn spinner_callback(spinner: &ProgressBar) -> ProgressCallback {
    let spinner = spinner.clone();
    Arc::new(move |count: usize, url: String| {
        spinner.set_message(format!(
            "Crawling... {} pages ({})",
            count,
            extract_url_path(&url)
        ));
    })
}

fn report_format(sub_matches: &ArgMatches) -> ReportFormat {
    sub_matches
        .get_one::<String>("format")
        .and_then(|format| ReportFormat::from_str(format))
        .unwrap_or(ReportFormat::Text)
}

fn emit_report(content: &str, output: Option<&PathBuf>, quiet: bool) -> Result<()> {
    match output {
        Some(path) => {
            save_report(content, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                println!(
                    "{} Report saved to {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn warn_on_gaps(report: &InterlinkReport) {
    if report.pages_crawled == 0 {
        eprintln!(
            "{} No matching pages found during crawl ({})",
            "⚠".yellow().bold(),
            report.category
        );
        return;
    }

    for bucket in report.results.targets.iter().filter(|t| t.matches.is_empty()) {
        eprintln!(
            "{} No internal links found to {}",
            "⚠".yellow().bold(),
            bucket.target.bright_white()
        );
    }
}

pub async fn handle_check(sub_matches: &ArgMatches, quiet: bool) {
    let home_url = sub_matches
        .get_one::<String>("url")
        .and_then(|url| parse_url_line(url))
        .unwrap_or_else(|| fail("Please enter a valid homepage URL"));

    let keywords: Vec<String> = sub_matches
        .get_many::<String>("keyword")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let filter = resolve_filter(sub_matches.get_one::<String>("category"), &keywords)
        .unwrap_or_else(|e| fail(e));

    let inline_targets: Vec<String> = sub_matches
        .get_many::<String>("targets")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let targets = load_targets_from_source(
        &inline_targets,
        sub_matches.get_one::<PathBuf>("targets-file"),
    )
    .unwrap_or_else(|e| fail(format!("{:#}", e)));

    let max_pages = *sub_matches.get_one::<usize>("max-pages").unwrap_or(&300);
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&15);
    let config = ScanConfig::default()
        .with_timeout_secs(timeout)
        .with_page_budget(max_pages);

    if !quiet {
        println!("\n🕷️  Checking {}", home_url.bright_white());
        println!("Pages: {}", filter);
        println!("Targets: {}", targets.len());
        println!("Max pages: {}\n", max_pages);
    }

    let mut crawler = Crawler::from_config(&config).unwrap_or_else(|e| fail(e));
    let spinner = crawl_spinner(quiet);
    if let Some(ref spinner) = spinner {
        spinner.set_message("Crawling... 0 pages");
        crawler = crawler.with_progress_callback(spinner_callback(spinner));
    }

    let result = find_interlinks(&crawler, &home_url, &filter, &targets).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let report = result.unwrap_or_else(|e| fail(e));

    if !quiet {
        println!(
            "{} Check complete! {} page(s) matched, {} link(s) found\n",
            "✓".green().bold(),
            report.pages_crawled,
            report.results.total_matches()
        );
    }
    warn_on_gaps(&report);

    let output = sub_matches.get_one::<PathBuf>("output");
    let emitted = render_interlink_report(&report, report_format(sub_matches))
        .context("Failed to render report")
        .and_then(|content| emit_report(&content, output, quiet));
    if let Err(e) = emitted {
        fail(format!("{:#}", e));
    }
}

pub async fn handle_discover(sub_matches: &ArgMatches, quiet: bool) {
    let home_url = sub_matches
        .get_one::<String>("url")
        .and_then(|url| parse_url_line(url))
        .unwrap_or_else(|| fail("Please enter a valid homepage URL"));

    let max_pages = *sub_matches.get_one::<usize>("max-pages").unwrap_or(&500);
    let sitemap_limit = *sub_matches.get_one::<usize>("sitemap-limit").unwrap_or(&30_000);
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&15);
    let config = ScanConfig::default()
        .with_timeout_secs(timeout)
        .with_discovery_budget(max_pages)
        .with_sitemap_visit_limit(sitemap_limit);

    if !quiet {
        println!("\n🗺️  Discovering URLs of {}", home_url.bright_white());
        println!("Sitemap limit: {}", sitemap_limit);
        println!("Crawl fallback max pages: {}\n", max_pages);
    }

    let mut discovery = UrlDiscovery::from_config(&config).unwrap_or_else(|e| fail(e));
    let spinner = crawl_spinner(quiet);
    if let Some(ref spinner) = spinner {
        spinner.set_message("Reading sitemaps...");
        discovery = discovery.with_progress_callback(spinner_callback(spinner));
    }

    let result = discovery.discover(&home_url).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let report = result.unwrap_or_else(|e| fail(e));

    if !quiet {
        println!(
            "{} Discovery complete! {} URL(s) from {}\n",
            "✓".green().bold(),
            report.urls.len(),
            report.source
        );
    }
    if report.urls.is_empty() {
        eprintln!("{} No URLs discovered for {}", "⚠".yellow().bold(), report.home_url);
    }

    let output = sub_matches.get_one::<PathBuf>("output");
    let emitted = render_discovery_report(&report, report_format(sub_matches))
        .context("Failed to render report")
        .and_then(|content| emit_report(&content, output, quiet));
    if let Err(e) = emitted {
        fail(format!("{:#}", e));
    }
}
