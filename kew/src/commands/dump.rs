use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result, bail};
use kew_core::{Indent, Overwrite};
use kew_decode::{Format, decode_file};
use kew_dump::{Config, Session};

use super::UnwrapOrExit;
use crate::{
    config::Settings,
    ops::{self, Document, DumpOptions},
    reports::{Report, TerminalOutput},
};

/// Package name used when neither the flag nor kew.toml sets one.
const DEFAULT_PACKAGE: &str = "k8s";

#[derive(Args)]
pub struct DumpCommand {
    /// Documents to dump (.json, .yaml, .yml or .toml)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Go package name for the generated files [default: k8s]
    #[arg(short, long)]
    pub package: Option<String>,

    /// Write every document into this one file instead of <input>.go
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Keep files that already exist
    #[arg(long)]
    pub no_clobber: bool,

    /// Input format (overrides the file extension)
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Indentation: "tab", a width, or a run of spaces
    #[arg(long)]
    pub indent: Option<Indent>,

    /// Stop descending after this many levels (0 = unlimited)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Sort map entries by key
    #[arg(long)]
    pub sort_keys: bool,

    /// Render values through their Error/String methods
    #[arg(long)]
    pub stringers: bool,

    /// Path to kew.toml (defaults to ./kew.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl DumpCommand {
    /// Run the dump command
    pub fn run(&self) -> Result<()> {
        let settings = Settings::load(self.config.as_deref()).unwrap_or_exit();
        let config = self.resolve(&settings)?;

        let documents: Vec<Document> = self
            .inputs
            .iter()
            .map(|path| Document {
                path: path.clone(),
                values: decode_file(path, self.format).unwrap_or_exit(),
            })
            .collect();

        let overwrite = if self.no_clobber {
            Overwrite::IfMissing
        } else {
            Overwrite::Always
        };
        let report = ops::dump(
            &documents,
            &Session::new(config),
            DumpOptions {
                output: self.output.as_deref(),
                dry_run: self.dry_run,
                overwrite,
            },
        )?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    /// Merge flags over kew.toml settings.
    fn resolve(&self, settings: &Settings) -> Result<Config> {
        let package = self
            .package
            .as_deref()
            .or(settings.package.as_deref())
            .unwrap_or(DEFAULT_PACKAGE);
        if !kew_core::is_identifier(package) {
            bail!("'{}' is not a valid Go package name", package);
        }

        let indent = match (&self.indent, &settings.indent) {
            (Some(indent), _) => indent.clone(),
            (None, Some(setting)) => setting.resolve().wrap_err("Invalid indent in kew.toml")?,
            (None, None) => Indent::GO,
        };

        Ok(Config::new(package)
            .with_indent(indent)
            .with_max_depth(self.max_depth.or(settings.max_depth).unwrap_or(0))
            .with_sort_keys(self.sort_keys || settings.sort_keys)
            .with_stringers(self.stringers || settings.invoke_stringers))
    }
}
