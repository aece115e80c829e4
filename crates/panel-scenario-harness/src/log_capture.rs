//! Per-thread capture of `log` records.
//!
//! The test harness runs each test on its own thread, so records captured
//! here never leak between tests even though the logger is global.

use std::cell::RefCell;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: Level,
    pub message: String,
}

thread_local! {
    static RECORDS: RefCell<Vec<CapturedRecord>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let captured = CapturedRecord {
            level: record.level(),
            message: record.args().to_string(),
        };
        RECORDS.with(|records| records.borrow_mut().push(captured));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Install the capture logger (first call wins) and clear this thread's records
pub fn start_capture() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Records logged on this thread since [`start_capture`]
pub fn captured() -> Vec<CapturedRecord> {
    RECORDS.with(|records| records.borrow().clone())
}

/// Captured records at `level` or more severe
pub fn captured_at(level: Level) -> Vec<CapturedRecord> {
    captured()
        .into_iter()
        .filter(|record| record.level <= level)
        .collect()
}
