use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for decoding (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Bundles a document's text with its file name so parser errors can be
/// reported against the offending location.
///
/// # Example
///
/// ```ignore
/// let ctx = SourceContext::new(content, "pod.yaml");
/// let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| ctx.yaml_error(e))?;
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a JSON error.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = self.line_col_span(source.line(), source.column());
        Box::new(Error::Json {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a YAML error.
    pub fn yaml_error(&self, source: serde_yaml::Error) -> Box<Error> {
        let span = source
            .location()
            .map(|loc| self.point(loc.index()));
        Box::new(Error::Yaml {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a TOML error.
    pub fn toml_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Toml {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Convert a 1-based line and column into a one-byte span.
    fn line_col_span(&self, line: usize, column: usize) -> Option<SourceSpan> {
        if line == 0 {
            return None;
        }
        let line_start: usize = self
            .src
            .split_inclusive('\n')
            .take(line - 1)
            .map(str::len)
            .sum();
        Some(self.point(line_start + column.saturating_sub(1)))
    }

    fn point(&self, offset: usize) -> SourceSpan {
        let offset = offset.min(self.src.len().saturating_sub(1));
        SourceSpan::from((offset, 1))
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(kew::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot tell the format of '{path}'")]
    #[diagnostic(
        code(kew::unknown_format),
        help("use a .json, .yaml, .yml or .toml extension, or pass --format")
    )]
    UnknownFormat { path: PathBuf },

    #[error("failed to parse JSON")]
    #[diagnostic(code(kew::json))]
    Json {
        #[source_code]
        src: NamedSource<String>,
        #[label("{source}")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML")]
    #[diagnostic(code(kew::yaml))]
    Yaml {
        #[source_code]
        src: NamedSource<String>,
        #[label("{source}")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse TOML")]
    #[diagnostic(code(kew::toml))]
    Toml {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_points_at_location() {
        let src = "{\n  \"a\": ,\n}";
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        let err = SourceContext::new(src, "bad.json").json_error(err);

        match *err {
            Error::Json { span: Some(span), .. } => {
                assert_eq!(&src[span.offset()..span.offset() + 1], ",");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_toml_error_has_span() {
        let src = "name = ";
        let err = toml::from_str::<toml::Table>(src).unwrap_err();
        let err = SourceContext::new(src, "bad.toml").toml_error(err);
        assert!(matches!(*err, Error::Toml { span: Some(_), .. }));
    }

    #[test]
    fn test_point_clamped_to_source() {
        let ctx = SourceContext::new("ab", "x.json");
        assert_eq!(ctx.point(10).offset(), 1);
    }
}
