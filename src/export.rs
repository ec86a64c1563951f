//! SVG to vertex-set export
//!
//! Fetches an SVG document, samples every `<path>` into a vertex set and
//! writes the sets as a JSON asset.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use snowglobe_core::{save_vertex_sets, vertex_sets_from_svg, AssetError, SvgError};

/// Error type for the exporter
#[derive(Debug)]
pub enum ExportError {
    /// The remote document could not be downloaded
    Fetch(String),
    /// Reading a local source failed
    Io(io::Error),
    /// The document or one of its paths could not be parsed
    Svg(SvgError),
    /// The vertex sets could not be serialized or written
    Asset(AssetError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Fetch(msg) => write!(f, "Failed to fetch SVG: {}", msg),
            ExportError::Io(err) => write!(f, "IO error: {}", err),
            ExportError::Svg(err) => write!(f, "{}", err),
            ExportError::Asset(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(err) => Some(err),
            ExportError::Svg(err) => Some(err),
            ExportError::Asset(err) => Some(err),
            ExportError::Fetch(_) => None,
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        ExportError::Io(err)
    }
}

impl From<SvgError> for ExportError {
    fn from(err: SvgError) -> Self {
        ExportError::Svg(err)
    }
}

impl From<AssetError> for ExportError {
    fn from(err: AssetError) -> Self {
        ExportError::Asset(err)
    }
}

impl From<reqwest::Error> for ExportError {
    fn from(err: reqwest::Error) -> Self {
        ExportError::Fetch(err.to_string())
    }
}

/// Where an SVG document comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SvgSource {
    /// An `http://` or `https://` URL
    Remote(String),
    /// A local path, given directly or as a `file://` URL
    Local(PathBuf),
}

impl SvgSource {
    /// Classify a command-line source argument
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            SvgSource::Remote(source.to_string())
        } else if let Some(path) = source.strip_prefix("file://") {
            SvgSource::Local(PathBuf::from(path))
        } else {
            SvgSource::Local(PathBuf::from(source))
        }
    }

    /// Read the document text
    pub fn fetch(&self) -> Result<String, ExportError> {
        match self {
            SvgSource::Remote(url) => {
                log::info!("Downloading {}", url);
                let text = reqwest::blocking::get(url)?.error_for_status()?.text()?;
                Ok(text)
            }
            SvgSource::Local(path) => Ok(std::fs::read_to_string(path)?),
        }
    }
}

/// Summary of a finished export
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSummary {
    /// Where the JSON was written
    pub path: PathBuf,
    /// Number of vertex sets written
    pub set_count: usize,
}

/// Output path for a requested name; a bare name gets a `.json` extension
pub fn output_path(name: &Path) -> PathBuf {
    if name.extension().is_some() {
        name.to_path_buf()
    } else {
        name.with_extension("json")
    }
}

/// Convert an SVG document's paths into a vertex-set JSON file
pub fn export_svg(
    source: &SvgSource,
    output: &Path,
    sample_length: f32,
) -> Result<ExportSummary, ExportError> {
    let svg = source.fetch()?;
    let sets = vertex_sets_from_svg(&svg, sample_length)?;
    if sets.is_empty() {
        log::warn!("No <path> elements found; writing an empty list");
    }

    let path = output_path(output);
    save_vertex_sets(&path, &sets)?;
    log::debug!("Wrote {} vertex sets to {}", sets.len(), path.display());

    Ok(ExportSummary {
        path,
        set_count: sets.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_classification() {
        assert_eq!(
            SvgSource::parse("https://example.com/cottage.svg"),
            SvgSource::Remote("https://example.com/cottage.svg".to_string())
        );
        assert_eq!(
            SvgSource::parse("file:///tmp/cottage.svg"),
            SvgSource::Local(PathBuf::from("/tmp/cottage.svg"))
        );
        assert_eq!(
            SvgSource::parse("assets/trees.svg"),
            SvgSource::Local(PathBuf::from("assets/trees.svg"))
        );
    }

    #[test]
    fn test_output_path_extension() {
        assert_eq!(output_path(Path::new("cottage")), PathBuf::from("cottage.json"));
        assert_eq!(output_path(Path::new("out/trees.json")), PathBuf::from("out/trees.json"));
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let source = SvgSource::Local(PathBuf::from("does/not/exist.svg"));
        let err = export_svg(&source, Path::new("unused"), 15.0).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn test_unwritable_output_is_asset_error() {
        let input = std::env::temp_dir().join(format!("snowglobe-unwritable-{}.svg", std::process::id()));
        std::fs::write(&input, r#"<svg><path d="M0 0 L10 0 L10 10 Z"/></svg>"#).unwrap();

        let result = export_svg(
            &SvgSource::Local(input.clone()),
            Path::new("does/not/exist/out"),
            15.0,
        );
        std::fs::remove_file(&input).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, ExportError::Asset(AssetError::Io(_))));
        assert!(err.to_string().starts_with("Asset IO error"));
    }
}
