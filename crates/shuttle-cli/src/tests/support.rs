//! Test support utilities for CLI coverage.
//!
//! Supplies a scratch directory for source files and a runner that captures
//! the CLI's output streams so tests stay focused on their assertions.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use rstest::fixture;
use tempfile::TempDir;

use crate::{IoStreams, run_with_io};

/// Captured result of one CLI invocation.
#[derive(Debug)]
pub(super) struct CliRun {
    pub(super) exit: ExitCode,
    pub(super) stdout: String,
    pub(super) stderr: String,
}

/// Runs the CLI with a non-terminal stdout, so `auto` output resolves to JSON.
pub(super) fn run_cli<I, S>(args: I) -> CliRun
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit = {
        let mut io = IoStreams::with_terminal_status(&mut stdout, &mut stderr, false);
        let argv = std::iter::once(OsString::from("shuttle"))
            .chain(args.into_iter().map(Into::into));
        run_with_io(argv, &mut io)
    };
    CliRun {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

/// Directory holding the source files a test writes.
pub(super) struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub(super) fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temporary directory"),
        }
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write source file");
        path
    }

    pub(super) fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

#[fixture]
pub(super) fn workspace() -> Workspace {
    Workspace::new()
}

pub(super) const WIDGET_SYMBOLS: &str = r#"[
  {
    "name": "Widget",
    "kind": 5,
    "range": {"start": {"line": 0, "character": 0}, "end": {"line": 4, "character": 2}},
    "selectionRange": {"start": {"line": 0, "character": 6}, "end": {"line": 0, "character": 12}},
    "children": [
      {
        "name": "resize",
        "detail": "void resize(int width, int height)",
        "kind": 6,
        "range": {"start": {"line": 2, "character": 4}, "end": {"line": 2, "character": 40}},
        "selectionRange": {"start": {"line": 2, "character": 9}, "end": {"line": 2, "character": 15}}
      }
    ]
  },
  {
    "name": "add",
    "detail": "int add(int a, int b)",
    "kind": 12,
    "range": {"start": {"line": 6, "character": 0}, "end": {"line": 6, "character": 40}},
    "selectionRange": {"start": {"line": 6, "character": 4}, "end": {"line": 6, "character": 7}}
  }
]"#;
