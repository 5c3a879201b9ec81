use log::{Level, LevelFilter, Log, Metadata, Record};

/// Sends `log` records to the browser console
struct ConsoleLogger;

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Debug builds also show debug records.
pub fn init() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if log::set_logger(&CONSOLE_LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Log helpers that tag records with the component they come from
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        log::debug!(target: component, "{message}");
    }

    pub fn info_with_component(component: &str, message: &str) {
        log::info!(target: component, "{message}");
    }

    pub fn warn_with_component(component: &str, message: &str) {
        log::warn!(target: component, "{message}");
    }

    pub fn error_with_component(component: &str, message: &str) {
        log::error!(target: component, "{message}");
    }
}
