use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize console logging.
///
/// `RUST_LOG` wins when set; otherwise `level` applies to this crate and
/// everything else stays at warn. Logs go to stderr so stdout stays clean for
/// the extracted text.
pub fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,pagelift={}", level)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    Registry::default().with(env_filter).with(console_layer).init();
}

/// Performance logging utility: logs elapsed time when dropped
pub struct PerformanceTimer {
    start: std::time::Instant,
    operation: String,
}

impl PerformanceTimer {
    pub fn start(operation: impl Into<String>) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation: operation.into(),
        }
    }

    pub fn checkpoint(&self, checkpoint: &str) {
        let elapsed = self.start.elapsed();
        info!(
            "⏱️  {} - {}: {:.2}ms",
            self.operation,
            checkpoint,
            elapsed.as_millis()
        );
    }
}

impl Drop for PerformanceTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        info!(
            "⏱️  Completed {}: {:.2}ms",
            self.operation,
            elapsed.as_millis()
        );
    }
}
