use std::path::{Path, PathBuf};

use tracing::debug;

/// Where an ingestor's CSV comes from.
#[derive(Debug, PartialEq)]
pub enum SourceLocation {
    /// `path:<file>`
    Local(PathBuf),
    /// `http://` or `https://`; recognised, never fetched.
    Remote(String),
}

impl SourceLocation {
    pub fn parse(url: &str) -> Result<SourceLocation, String> {
        if let Some(path) = url.strip_prefix("path:") {
            Ok(SourceLocation::Local(PathBuf::from(path)))
        } else if url.starts_with("http://") || url.starts_with("https://") {
            Ok(SourceLocation::Remote(url.to_string()))
        } else {
            Err(format!("Unknown URL scheme: {url}"))
        }
    }
}

/// Local file backing `location`. Route maps are read in place.
pub fn resolve_path(location: SourceLocation) -> Result<PathBuf, String> {
    match location {
        SourceLocation::Local(path) => {
            if !Path::new(&path).is_file() {
                return Err(format!("No route map at {}", path.display()));
            }
            debug!("Using route map {}", path.display());
            Ok(path)
        }
        SourceLocation::Remote(url) => Err(format!("Remote route maps are not supported: {url}")),
    }
}
