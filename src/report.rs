use std::{
    collections::{HashSet, VecDeque},
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::debug;

/// Files above this size are listed individually.
pub const DEFAULT_THRESHOLD: u64 = 100 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargeFile {
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Default)]
pub struct SizeReport {
    pub file_count: usize,
    pub total_bytes: u64,
    pub large_files: Vec<LargeFile>,
}

impl SizeReport {
    pub fn total_megabytes(&self) -> f64 {
        (self.total_bytes as f64 / 1024.0 / 1024.0 * 100.0).round() / 100.0
    }
}

/// Walk every root that exists, breadth first. Symlinks are followed; a
/// directory reached twice is only scanned once.
pub fn scan_sizes(roots: &[PathBuf], threshold: u64) -> anyhow::Result<SizeReport> {
    let mut report = SizeReport::default();
    let mut visited: HashSet<PathBuf> = HashSet::new();

    let mut q: VecDeque<PathBuf> = VecDeque::new();
    for root in roots {
        if root.exists() {
            q.push_back(root.clone());
        } else {
            debug!("{root:?} does not exist. skipping...");
        }
    }

    while let Some(dir) = q.pop_front() {
        let real = dir
            .canonicalize()
            .with_context(|| format!("while resolving {dir:?}"))?;
        if !visited.insert(real) {
            debug!("{dir:?} was already scanned. skipping...");
            continue;
        }

        for entry in std::fs::read_dir(&dir).with_context(|| format!("while scanning {dir:?}"))? {
            let path = entry?.path();
            let meta = match std::fs::metadata(&path) {
                Ok(meta) => meta,
                Err(e) => {
                    debug!("cannot stat {path:?} ({e}). skipping...");
                    continue;
                }
            };

            if meta.is_dir() {
                q.push_back(path);
            } else if meta.is_file() {
                record(&mut report, &path, meta.len(), threshold);
            }
        }
    }
    report.large_files.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.path.cmp(&b.path)));

    Ok(report)
}

fn record(report: &mut SizeReport, path: &Path, bytes: u64, threshold: u64) {
    report.file_count += 1;
    report.total_bytes += bytes;
    if bytes > threshold {
        report.large_files.push(LargeFile {
            path: path.to_owned(),
            bytes,
        });
    }
}
