// Report rendering for interlink checks and URL discovery

use crate::discovery::DiscoveryReport;
use crate::error::ReportError;
use crate::interlink::InterlinkReport;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

pub fn render_interlink_report(
    report: &InterlinkReport,
    format: ReportFormat,
) -> Result<String, ReportError> {
    match format {
        ReportFormat::Text => Ok(generate_interlink_text(report)),
        ReportFormat::Json => Ok(generate_interlink_json(report)?),
        ReportFormat::Csv => generate_interlink_csv(report),
        ReportFormat::Markdown => Ok(generate_interlink_markdown(report)),
    }
}

pub fn render_discovery_report(
    report: &DiscoveryReport,
    format: ReportFormat,
) -> Result<String, ReportError> {
    match format {
        ReportFormat::Text => Ok(generate_discovery_text(report)),
        ReportFormat::Json => Ok(generate_discovery_json(report)?),
        ReportFormat::Csv => generate_discovery_csv(report),
        ReportFormat::Markdown => Ok(generate_discovery_markdown(report)),
    }
}

pub fn generate_interlink_text(report: &InterlinkReport) -> String {
    let mut text = String::new();

    text.push_str(RULE);
    text.push_str("                          INTERLINK REPORT\n");
    text.push_str(RULE);
    text.push('\n');

    text.push_str(&format!("Homepage:       {}\n", report.home_url));
    text.push_str(&format!("Crawled:        {}\n", report.category));
    text.push_str(&format!("Pages Matched:  {}\n", report.pages_crawled));
    text.push_str(&format!("Targets:        {}\n", report.results.targets.len()));
    text.push_str(&format!("Links Found:    {}\n", report.results.total_matches()));
    text.push('\n');

    if report.pages_crawled == 0 {
        text.push_str("No matching pages found during crawl.\n\n");
    }

    for bucket in &report.results.targets {
        text.push_str(RULE);
        text.push_str(&format!("Interlinking results for: {}\n", bucket.target));
        text.push_str(RULE);
        text.push('\n');

        if bucket.matches.is_empty() {
            text.push_str("  No internal links found to the target URL in the selected category.\n\n");
            continue;
        }

        text.push_str(&format!(
            "  Found {} link(s) to this target.\n\n",
            bucket.matches.len()
        ));
        for (idx, link) in bucket.matches.iter().enumerate() {
            text.push_str(&format!("  [{}] From Page:   {}\n", idx + 1, link.page_url));
            text.push_str(&format!("      Anchor Text: {}\n", anchor_or_placeholder(&link.anchor_text)));
        }
        text.push('\n');
    }

    text
}

pub fn generate_interlink_json(report: &InterlinkReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": metadata("interlinks"),
            "summary": {
                "home_url": report.home_url,
                "category": report.category,
                "pages_crawled": report.pages_crawled,
                "total_targets": report.results.targets.len(),
                "total_matches": report.results.total_matches(),
            },
            "targets": report.results.targets,
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_interlink_csv(report: &InterlinkReport) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["target", "page_url", "anchor_text"])?;

    for bucket in &report.results.targets {
        if bucket.matches.is_empty() {
            writer.write_record([bucket.target.as_str(), "", ""])?;
        }
        for link in &bucket.matches {
            writer.write_record([
                bucket.target.as_str(),
                link.page_url.as_str(),
                link.anchor_text.as_str(),
            ])?;
        }
    }

    finish_csv(writer)
}

pub fn generate_interlink_markdown(report: &InterlinkReport) -> String {
    let mut md = String::new();

    md.push_str("# Interlink Report\n\n");
    md.push_str(&format!("- **Homepage:** {}\n", report.home_url));
    md.push_str(&format!("- **Crawled:** {}\n", report.category));
    md.push_str(&format!("- **Pages matched:** {}\n", report.pages_crawled));
    md.push_str(&format!("- **Links found:** {}\n\n", report.results.total_matches()));

    for bucket in &report.results.targets {
        md.push_str(&format!("## `{}`\n\n", bucket.target));
        if bucket.matches.is_empty() {
            md.push_str("_No internal links found to this target._\n\n");
            continue;
        }
        md.push_str("| From Page | Anchor Text |\n");
        md.push_str("|---|---|\n");
        for link in &bucket.matches {
            md.push_str(&format!(
                "| [{page}]({page}) | {anchor} |\n",
                page = link.page_url,
                anchor = escape_markdown_cell(anchor_or_placeholder(&link.anchor_text)),
            ));
        }
        md.push('\n');
    }

    md
}

pub fn generate_discovery_text(report: &DiscoveryReport) -> String {
    let mut text = String::new();

    text.push_str(RULE);
    text.push_str("                          URL DISCOVERY REPORT\n");
    text.push_str(RULE);
    text.push('\n');
    text.push_str(&format!("Homepage:    {}\n", report.home_url));
    text.push_str(&format!("Source:      {}\n", report.source));
    text.push_str(&format!("URLs Found:  {}\n\n", report.urls.len()));

    if report.urls.is_empty() {
        text.push_str("  (no URLs discovered)\n");
    }
    for url in &report.urls {
        text.push_str(&format!("  {}\n", url));
    }

    text
}

pub fn generate_discovery_json(report: &DiscoveryReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": metadata("discovery"),
            "summary": {
                "home_url": report.home_url,
                "source": report.source,
                "total_urls": report.urls.len(),
            },
            "urls": report.urls,
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_discovery_csv(report: &DiscoveryReport) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["url"])?;
    for url in &report.urls {
        writer.write_record([url.as_str()])?;
    }
    finish_csv(writer)
}

pub fn generate_discovery_markdown(report: &DiscoveryReport) -> String {
    let mut md = String::new();
    md.push_str("# URL Discovery Report\n\n");
    md.push_str(&format!("- **Homepage:** {}\n", report.home_url));
    md.push_str(&format!("- **Source:** {}\n", report.source));
    md.push_str(&format!("- **URLs found:** {}\n\n", report.urls.len()));
    for url in &report.urls {
        md.push_str(&format!("- <{}>\n", url));
    }
    md
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn metadata(kind: &str) -> serde_json::Value {
    serde_json::json!({
        "generator": "Interlinker",
        "version": env!("CARGO_PKG_VERSION"),
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "kind": kind,
        "format": "json",
    })
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String, ReportError> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn anchor_or_placeholder(anchor: &str) -> &str {
    if anchor.is_empty() { "(no text)" } else { anchor }
}

fn escape_markdown_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
