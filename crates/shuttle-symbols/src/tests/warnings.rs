//! Tests for the warnings logged when a symbol cannot take a derived view.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use rstest::rstest;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::{Position, Symbol, SymbolKind, TextRange};

/// In-memory log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        let buffer = self.0.lock().expect("log buffer lock");
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `action` under a subscriber that records WARN and above.
fn capture_warnings(action: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, action);
    logs.contents()
}

fn symbol(name: &str, kind: SymbolKind, description: &str) -> Symbol {
    Symbol::new(
        name,
        kind,
        TextRange::new(Position::new(0, 0), Position::new(10, 0)),
    )
    .with_description(description)
}

#[test]
fn class_view_of_a_variable_logs_a_warning() {
    let counter = symbol("counter", SymbolKind::Variable, "int counter");

    let logs = capture_warnings(|| {
        assert!(counter.to_class(&[counter.clone()]).is_none());
    });

    assert!(logs.contains("WARN"), "logs: {logs}");
    assert!(logs.contains("symbol should be a class or struct"), "logs: {logs}");
    assert!(logs.contains("symbol=counter"), "logs: {logs}");
}

#[test]
fn function_view_of_a_class_logs_a_warning() {
    let widget = symbol("Widget", SymbolKind::Class, "class Widget");

    let logs = capture_warnings(|| {
        assert!(widget.to_function().is_none());
    });

    assert!(logs.contains("WARN"), "logs: {logs}");
    assert!(
        logs.contains("symbol should be either a method or a function"),
        "logs: {logs}"
    );
    assert!(logs.contains("symbol=Widget"), "logs: {logs}");
}

#[test]
fn unparsable_signature_logs_a_warning() {
    let broken = symbol("f", SymbolKind::Function, "int f");

    let logs = capture_warnings(|| {
        assert!(broken.to_function().is_none());
    });

    assert!(logs.contains("WARN"), "logs: {logs}");
    assert!(logs.contains("ignoring function symbol"), "logs: {logs}");
}

#[rstest]
#[case(SymbolKind::Class, "class Widget")]
#[case(SymbolKind::Function, "void Widget()")]
fn matching_kinds_log_nothing(#[case] kind: SymbolKind, #[case] description: &str) {
    let widget = symbol("Widget", kind, description);

    let logs = capture_warnings(|| {
        if kind == SymbolKind::Class {
            assert!(widget.to_class(&[widget.clone()]).is_some());
        } else {
            assert!(widget.to_function().is_some());
        }
    });

    assert!(logs.is_empty(), "logs: {logs}");
}
