use interlinker::handlers::*;
use interlinker_scanner::CategoryFilter;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_parse_url_line_with_scheme() {
    let result = parse_url_line("https://example.com");
    assert_eq!(result, Some("https://example.com".to_string()));
}

#[test]
fn test_parse_url_line_without_scheme() {
    assert_eq!(parse_url_line("example.com"), Some("http://example.com".to_string()));
    assert_eq!(
        parse_url_line("  localhost:8080 "),
        Some("http://localhost:8080".to_string())
    );
}

#[test]
fn test_parse_url_line_invalid() {
    assert_eq!(parse_url_line("not a valid url!!!"), None);
    assert_eq!(parse_url_line("   "), None);
}

#[test]
fn test_extract_url_path() {
    assert_eq!(extract_url_path("https://example.com/blog/post"), "/blog/post");
    assert_eq!(extract_url_path("https://example.com/"), "/");
    assert_eq!(extract_url_path("https://example.com"), "/");
}

#[test]
fn test_load_targets_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "https://example.com/pricing")?;
    writeln!(temp_file, "https://example.com/docs/, https://example.com/about")?;
    writeln!(temp_file)?; // Empty line
    writeln!(temp_file, "https://example.com/pricing/")?;

    let targets = load_targets_from_file(temp_file.path())?;

    assert_eq!(
        targets.iter().collect::<Vec<_>>(),
        vec![
            "https://example.com/pricing",
            "https://example.com/docs",
            "https://example.com/about",
        ]
    );

    Ok(())
}

#[test]
fn test_load_targets_from_file_empty() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file).unwrap();
    writeln!(temp_file, " , ").unwrap();

    let result = load_targets_from_file(temp_file.path());

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("No target URLs"));
}

#[test]
fn test_load_targets_from_file_missing() {
    let result = load_targets_from_file(&PathBuf::from("/nonexistent/targets.txt"));
    assert!(result.unwrap_err().to_string().contains("Failed to read targets file"));
}

#[test]
fn test_load_targets_from_source_merges_inline_and_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "https://example.com/b").unwrap();
    writeln!(temp_file, "https://example.com/c").unwrap();

    let inline = vec!["https://example.com/a, https://example.com/b/".to_string()];
    let path = PathBuf::from(temp_file.path());
    let targets = load_targets_from_source(&inline, Some(&path)).unwrap();

    assert_eq!(
        targets.iter().collect::<Vec<_>>(),
        vec![
            "https://example.com/a",
            "https://example.com/b",
            "https://example.com/c",
        ]
    );
}

#[test]
fn test_load_targets_from_source_no_input() {
    let result = load_targets_from_source(&[], None);
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("at least one target URL")
    );
}

#[test]
fn test_resolve_filter() {
    let blog = "blog-pages".to_string();
    assert_eq!(
        resolve_filter(Some(&blog), &[]).unwrap(),
        CategoryFilter::Keyword("/blog".to_string())
    );
    assert_eq!(resolve_filter(None, &[]).unwrap(), CategoryFilter::AllPages);

    let keywords = vec!["/docs".to_string()];
    assert_eq!(
        resolve_filter(Some(&blog), &keywords).unwrap(),
        CategoryFilter::Keyword("/docs".to_string())
    );

    let bogus = "recipes".to_string();
    assert!(resolve_filter(Some(&bogus), &[]).is_err());
}
