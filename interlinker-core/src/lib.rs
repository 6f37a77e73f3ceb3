pub mod discovery;
pub mod error;
pub mod interlink;
pub mod report;

pub use discovery::{DiscoveryReport, DiscoverySource, UrlDiscovery};
pub use error::{InterlinkError, ReportError};
pub use interlink::{
    InterlinkReport, LinkMatch, MatchResult, TargetMatches, TargetSet, find_interlinks,
    match_links, validate_homepage,
};
pub use report::ReportFormat;
