use std::path::PathBuf;

use log::{error, warn};

/// Something an operator should know about while content is being loaded.
///
/// Diagnostics never reach end users; the pipeline substitutes a fallback
/// (or an empty listing) and reports what happened through a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    DirectoryUnreadable { path: PathBuf, error: String },
    DocumentUnreadable { path: PathBuf, error: String },
    HeaderInvalid { path: PathBuf, error: String },
    SyntaxGuidance { path: PathBuf },
}

pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Writes diagnostics through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::DirectoryUnreadable { path, error } => {
                error!("Error reading directory {path:?}: {error}");
            }
            Diagnostic::DocumentUnreadable { path, error } => {
                error!("Error reading {path:?}: {error}. Using fallback data.");
            }
            Diagnostic::HeaderInvalid { path, error } => {
                error!("Error parsing front matter of {path:?}: {error}. Using fallback data.");
            }
            Diagnostic::SyntaxGuidance { path } => {
                warn!(
                    concat!(
                        "YAML syntax error in {:?}. Common issues:\n",
                        "  - Invalid date format: use \"YYYY-MM-DD\" (e.g. \"2024-11-13\")\n",
                        "  - Quote conflicts: use single quotes for strings containing double quotes\n",
                        "  - Indentation: use spaces, not tabs",
                    ),
                    path
                );
            }
        }
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
