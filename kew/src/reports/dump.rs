//! Dump command report data structures.

use std::path::PathBuf;

use kew_core::WriteResult;

use super::output::{Output, Report};

/// Report data from a dump run.
#[derive(Debug)]
pub struct DumpReport {
    /// Number of documents decoded across all inputs.
    pub documents: usize,

    /// Files written or previewed.
    pub result: DumpResult,
}

#[derive(Debug)]
pub enum DumpResult {
    /// Files were written to disk.
    Written(Vec<WrittenFile>),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

#[derive(Debug)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub outcome: WriteResult,
    /// Declarations the file holds.
    pub values: usize,
}

#[derive(Debug)]
pub struct PreviewFile {
    pub path: PathBuf,
    pub content: String,
}

impl Report for DumpReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            DumpResult::Written(files) => {
                for file in files {
                    let path = file.path.display();
                    match file.outcome {
                        WriteResult::Written => {
                            out.added_item(&format!("{} ({} values)", path, file.values))
                        }
                        WriteResult::Skipped => out.list_item(&format!("{} (exists, skipped)", path)),
                    }
                }
                out.key_value("Documents", &self.documents.to_string());
            }
            DumpResult::Preview(files) => {
                for file in files {
                    out.divider(&file.path.display().to_string());
                    out.preformatted(&file.content);
                }
                out.divider("Summary");
                out.preformatted(&format!("{} files would be generated", files.len()));
            }
        }
    }
}
