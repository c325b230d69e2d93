use std::io;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Line-buffered writer that forwards each formatted event to the browser
/// console, choosing the console method from the event level.
pub(crate) struct ConsoleWriter {
    level: tracing::Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buf).trim_end().to_string();
        self.buf.clear();
        emit(self.level, &line);
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

fn emit(level: tracing::Level, line: &str) {
    if !cfg!(target_arch = "wasm32") {
        eprintln!("{line}");
        return;
    }

    let msg = wasm_bindgen::JsValue::from_str(line);
    match level {
        tracing::Level::ERROR => web_sys::console::error_1(&msg),
        tracing::Level::WARN => web_sys::console::warn_1(&msg),
        tracing::Level::INFO => web_sys::console::info_1(&msg),
        _ => web_sys::console::debug_1(&msg),
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: tracing::Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

pub(crate) fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_LEVEL))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops.
pub(crate) fn init_logging(level: &str) {
    // wasm32-unknown-unknown has no system clock for the default timer.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(true)
        .try_init();
}
