use std::io;

use gloo::console;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Tagged logging to the browser console
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        console::debug!(Self::line(component, message));
    }

    pub fn info_with_component(component: &str, message: &str) {
        console::info!(Self::line(component, message));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        console::warn!(Self::line(component, message));
    }

    pub fn error_with_component(component: &str, message: &str) {
        console::error!(Self::line(component, message));
    }

    fn at(level: Level, component: &str, message: &str) {
        if level == Level::ERROR {
            Self::error_with_component(component, message);
        } else if level == Level::WARN {
            Self::warn_with_component(component, message);
        } else if level == Level::INFO {
            Self::info_with_component(component, message);
        } else {
            Self::debug_with_component(component, message);
        }
    }

    fn line(component: &str, message: &str) -> String {
        format!("[{}] {}", component, message)
    }
}

/// Send `tracing` events from the shared crate to the console, tagged with
/// their module path.
pub fn init_tracing() {
    let filter = EnvFilter::new(if cfg!(debug_assertions) { "debug" } else { "info" });
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .try_init();

    if let Err(e) = installed {
        Logger::warn_with_component("tracing", &format!("subscriber not installed: {}", e));
    }
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            target: String::from("tracing"),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            target: meta.target().to_string(),
        }
    }
}

/// Receives one formatted event per write.
struct ConsoleWriter {
    level: Level,
    target: String,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(message) = event_text(buf) {
            Logger::at(self.level, &self.target, &message);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn event_text(buf: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(buf);
    let text = text.trim_end();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_tagged() {
        assert_eq!(Logger::line("ExpenseForm", "submitted"), "[ExpenseForm] submitted");
    }

    #[test]
    fn test_event_text_drops_trailing_newline() {
        assert_eq!(
            event_text(b"unparseable amount, using zero input=\"9999\"\n").as_deref(),
            Some("unparseable amount, using zero input=\"9999\"")
        );
        assert_eq!(event_text(b"\n"), None);
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_shared_warnings_reach_the_console() {
        init_tracing();
        init_tracing();
        assert_eq!(shared::money::parse(&"9".repeat(40)), rust_decimal::Decimal::ZERO);
    }
}
