//! Dump operation: decoded documents to generated Go files.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use kew_core::{File, FileRules, GENERATED_HEADER, Overwrite};
use kew_dump::Session;
use kew_value::Value;

use crate::reports::{DumpReport, DumpResult, PreviewFile, WrittenFile};

/// One decoded input file.
pub struct Document {
    pub path: PathBuf,
    pub values: Vec<Value>,
}

impl Document {
    /// Where this document's Go file goes: the input path plus `.go`.
    pub fn target(&self) -> PathBuf {
        let mut target = self.path.clone().into_os_string();
        target.push(".go");
        PathBuf::from(target)
    }
}

/// Options for the dump operation.
pub struct DumpOptions<'a> {
    /// Combine every document into this one file.
    pub output: Option<&'a Path>,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    pub overwrite: Overwrite,
}

/// Render the documents and write (or preview) the resulting files.
pub fn dump(documents: &[Document], session: &Session, opts: DumpOptions) -> Result<DumpReport> {
    let rules = FileRules {
        overwrite: opts.overwrite,
        header: Some(GENERATED_HEADER),
    };

    let files: Vec<(File, usize)> = match opts.output {
        Some(output) => {
            let values: Vec<Value> = documents
                .iter()
                .flat_map(|doc| doc.values.iter().cloned())
                .collect();
            let text = session.render(&values).text;
            vec![(File::new(output, text).with_rules(rules), values.len())]
        }
        None => documents
            .iter()
            .map(|doc| {
                let text = session.render(&doc.values).text;
                (
                    File::new(doc.target(), text).with_rules(rules.clone()),
                    doc.values.len(),
                )
            })
            .collect(),
    };

    let result = if opts.dry_run {
        DumpResult::Preview(
            files
                .into_iter()
                .map(|(file, _)| PreviewFile {
                    path: file.path().to_path_buf(),
                    content: file.content(),
                })
                .collect(),
        )
    } else {
        let mut written = Vec::with_capacity(files.len());
        for (file, values) in files {
            let outcome = file
                .write()
                .wrap_err_with(|| format!("Failed to write {}", file.path().display()))?;
            tracing::debug!(path = %file.path().display(), ?outcome, "wrote file");
            written.push(WrittenFile {
                path: file.path().to_path_buf(),
                outcome,
                values,
            });
        }
        DumpResult::Written(written)
    };

    Ok(DumpReport {
        documents: documents.iter().map(|doc| doc.values.len()).sum(),
        result,
    })
}
