//! Writing an emitted bundle to disk
//!
//! Every file is attempted independently. A failed write is logged and
//! recorded in the [`WriteReport`]; it never stops the remaining files and
//! files already written are left in place.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::EmittedBundle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<WriteFailure>,
}

impl WriteReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn write_bundle(bundle: &EmittedBundle, out_dir: &Path) -> WriteReport {
    let mut report = WriteReport::default();

    for file in &bundle.files {
        let path = out_dir.join(&file.relative_path);
        match write_file(&path, &file.contents) {
            Ok(()) => {
                debug!("Wrote {}", path.display());
                report.written.push(path);
            }
            Err(e) => {
                debug!("Error saving {}: {}", path.display(), e);
                report.failed.push(WriteFailure {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    report
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
