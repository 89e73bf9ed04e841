//! The optional `kew.toml` settings file.

use std::path::{Path, PathBuf};

use kew_core::{Indent, MAX_SPACES, ParseIndentError};
use kew_decode::{Error, Result, SourceContext};
use serde::Deserialize;

/// Settings file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG: &str = "kew.toml";

/// Indentation as written in `kew.toml`: a width or a string such as `"tab"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IndentSetting {
    Width(u64),
    Text(String),
}

impl IndentSetting {
    /// Widths beyond [`MAX_SPACES`] are clamped.
    pub fn resolve(&self) -> std::result::Result<Indent, ParseIndentError> {
        match self {
            Self::Width(width) => Ok(Indent::Spaces(
                u8::try_from(*width).unwrap_or(MAX_SPACES).min(MAX_SPACES),
            )),
            Self::Text(text) => text.parse(),
        }
    }
}

/// Values from `kew.toml`. Every key is optional; command-line flags win.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub package: Option<String>,
    pub indent: Option<IndentSetting>,
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub sort_keys: bool,
    #[serde(default)]
    pub invoke_stringers: bool,
}

impl Settings {
    /// Load settings from `path`, or from `./kew.toml` when it exists.
    ///
    /// An explicitly named file must exist; the default one may not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::open(path),
            None if Path::new(DEFAULT_CONFIG).is_file() => Self::open(DEFAULT_CONFIG),
            None => Ok(Self::default()),
        }
    }

    /// Open and parse a settings file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: PathBuf::from(path),
                source: e,
            })
        })?;
        let settings = Self::from_str_with_filename(&content, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        toml::from_str(content).map_err(|e| ctx.toml_error(e))
    }
}
