use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Filter directive used when RUST_LOG is not set
fn default_directive(verbose: bool) -> &'static str {
  if verbose {
    "warn,jira_activity=debug"
  } else {
    "warn"
  }
}

/// Install the stderr subscriber. Keep the returned guard alive until exit so
/// buffered events are flushed.
pub fn init(verbose: bool) -> WorkerGuard {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

  let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_target(false)
    .init();

  guard
}
