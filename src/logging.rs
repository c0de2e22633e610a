//! `log` backend: browser console on wasm32, `env_logger` everywhere else.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    pub(super) struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let value = JsValue::from_str(&format!("[grainfall {}] {}", record.level(), record.args()));
            match record.level() {
                Level::Error => web_sys::console::error_1(&value),
                Level::Warn => web_sys::console::warn_1(&value),
                _ => web_sys::console::log_1(&value),
            }
        }

        fn flush(&self) {}
    }
}

/// Install the logger. A second call (or another logger already set) is a no-op.
/// Natively `RUST_LOG` takes precedence over `level`.
pub fn install(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    {
        if log::set_logger(&console::LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_target(false)
            .try_init();
    }
}
