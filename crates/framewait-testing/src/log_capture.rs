//! Per-thread capture of `log` records.
//!
//! The first call to [`capture_logs`] installs a process-wide logger. The
//! logger only keeps records emitted on a thread that is currently inside
//! `capture_logs`, so parallel tests do not see each other's output. If
//! another logger was installed first, captures stay empty.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

struct CaptureLogger;

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

thread_local! {
    static CAPTURED: RefCell<Option<Vec<CapturedRecord>>> = const { RefCell::new(None) };
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        CAPTURED.with(|captured| captured.borrow().is_some())
    }

    fn log(&self, record: &Record<'_>) {
        CAPTURED.with(|captured| {
            if let Some(records) = captured.borrow_mut().as_mut() {
                records.push(CapturedRecord {
                    level: record.level(),
                    target: record.target().to_owned(),
                    message: record.args().to_string(),
                });
            }
        });
    }

    fn flush(&self) {}
}

fn install() {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Runs `f` and returns its result with every record it logged.
///
/// Nested captures are not supported; the inner one takes the records.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedRecord>) {
    install();
    let previous = CAPTURED.with(|captured| captured.borrow_mut().replace(Vec::new()));
    let result = f();
    let records = CAPTURED.with(|captured| {
        let mut captured = captured.borrow_mut();
        let records = captured.take().unwrap_or_default();
        *captured = previous;
        records
    });
    (result, records)
}

/// Records at `Warn` level or more severe.
pub fn diagnostics(records: &[CapturedRecord]) -> Vec<&CapturedRecord> {
    records
        .iter()
        .filter(|record| record.level <= Level::Warn)
        .collect()
}
