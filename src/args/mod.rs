//! Argument builder
//!
//! Renders a sanitized [`CopyRequest`] into robocopy's positional-then-flag
//! grammar. The result is handed to the process layer as an argument vector
//! and is never joined into a shell string.

use crate::types::CopyRequest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered robocopy tokens. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentList(Vec<String>);

impl ArgumentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.0.push(token.into());
    }

    fn push_if(&mut self, condition: bool, token: &str) {
        if condition {
            self.0.push(token.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ArgumentList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Display-only rendering; quotes tokens containing spaces.
impl fmt::Display for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if token.contains(' ') {
                write!(f, "\"{}\"", token)?;
            } else {
                f.write_str(token)?;
            }
        }
        Ok(())
    }
}

/// Build the robocopy argument vector for a request.
///
/// Zero for `levels`, `retries`, `wait_seconds` or `thread_count` means
/// "unset" and suppresses the token.
///
/// # Example
/// ```
/// use robokit::args::build;
/// use robokit::types::CopyRequest;
///
/// let request = CopyRequest {
///     source: r"C:\src".to_string(),
///     destination: r"D:\dst".to_string(),
///     recurse: true,
///     retries: 3,
///     ..CopyRequest::default()
/// };
///
/// assert_eq!(build(&request).into_vec(), vec![r"C:\src", r"D:\dst", "/S", "/R:3"]);
/// ```
pub fn build(request: &CopyRequest) -> ArgumentList {
    let mut args = ArgumentList::new();

    args.push(request.source.as_str());
    args.push(request.destination.as_str());
    if !request.has_default_pattern() {
        args.push(request.file_pattern.as_str());
    }

    // Structure
    args.push_if(request.recurse, "/S");
    args.push_if(request.copy_empty_dirs, "/E");
    if request.levels > 0 {
        args.push(format!("/LEV:{}", request.levels));
    }

    // Copy mode
    args.push_if(request.restart_mode, "/Z");
    args.push_if(request.backup_mode, "/B");
    args.push_if(request.copy_all, "/COPYALL");
    args.push_if(request.mirror, "/MIR");
    args.push_if(request.move_files, "/MOVE");
    args.push_if(request.move_dirs, "/MOV");

    // File selection
    args.push_if(request.copy_archive, "/A");
    args.push_if(request.reset_archive, "/M");
    if !request.include_attributes.is_empty() {
        args.push(format!("/IA:{}", request.include_attributes));
    }
    if !request.exclude_attributes.is_empty() {
        args.push(format!("/XA:{}", request.exclude_attributes));
    }

    push_list(&mut args, "/XF", &request.exclude_files);
    push_list(&mut args, "/XD", &request.exclude_dirs);

    // Retry
    if request.retries > 0 {
        args.push(format!("/R:{}", request.retries));
    }
    if request.wait_seconds > 0 {
        args.push(format!("/W:{}", request.wait_seconds));
    }

    // Logging
    args.push_if(request.verbose, "/V");
    args.push_if(request.no_progress, "/NP");
    args.push_if(request.show_eta, "/ETA");

    // Performance
    if request.multi_thread && request.thread_count > 0 {
        args.push(format!("/MT:{}", request.thread_count));
    }

    args
}

/// One `flag value` pair per comma-separated entry; blank entries skipped.
fn push_list(args: &mut ArgumentList, flag: &str, list: &str) {
    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        args.push(flag);
        args.push(entry);
    }
}
