use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("interlinker")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("interlinker")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner, spinner and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Log crawl decisions to stderr (overridden by RUST_LOG)")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("check")
                .about(
                    "Crawl a category of a site and report which pages link to the target \
                URLs, with their anchor text.",
                )
                .arg(
                    arg!(-u --"url" <HOMEPAGE>)
                        .required(true)
                        .help("The homepage to start crawling from"),
                )
                .arg(
                    arg!(-c --"category" <CATEGORY>)
                        .required(false)
                        .help("Which pages to scan: blog-pages, blog-categories, product-pages, all-pages")
                        .value_parser(["blog-pages", "blog-categories", "product-pages", "all-pages"])
                        .default_value("all-pages")
                        .conflicts_with("keyword"),
                )
                .arg(
                    arg!(-k --"keyword" <KEYWORD>)
                        .required(false)
                        .help("Custom URL keyword filter (repeatable; a page matches any of them)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(-t --"targets" <URLS>)
                        .required(false)
                        .help("Comma-separated target URLs to look for")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(-T --"targets-file" <PATH>)
                        .required(false)
                        .help("Path to a file of target URLs, one per line or comma-separated")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"max-pages" <NUM_PAGES>)
                        .required(false)
                        .help("Maximum number of pages to visit")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("300"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-page request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("15"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, markdown")
                        .value_parser(["text", "json", "csv", "markdown"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("discover")
                .about(
                    "List every URL of a site, from its sitemaps when available or from a \
                full crawl otherwise.",
                )
                .arg(
                    arg!(-u --"url" <HOMEPAGE>)
                        .required(true)
                        .help("The homepage of the site"),
                )
                .arg(
                    arg!(--"max-pages" <NUM_PAGES>)
                        .required(false)
                        .help("Maximum number of pages to visit when falling back to a crawl")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("500"),
                )
                .arg(
                    arg!(--"sitemap-limit" <NUM_URLS>)
                        .required(false)
                        .help("Maximum number of URLs to collect from sitemaps")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("30000"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-page request timeout in seconds (sitemaps get 5 more)")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("15"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, markdown")
                        .value_parser(["text", "json", "csv", "markdown"])
                        .default_value("text"),
                ),
        )
}
