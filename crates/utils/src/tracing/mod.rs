use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tryscope_core::{Error, ResourceId};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, info_span, instrument, span, trace, warn, Level, Span};

/// Default filter directive when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

/// Initialize the tracing system
///
/// Honours `RUST_LOG`, falling back to `info`. Output goes to stderr so it
/// never interleaves with command output on stdout. Calling this more than
/// once returns an error instead of replacing the installed subscriber.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    init_with_default(DEFAULT_FILTER)
}

/// Initialize tracing with a caller supplied fallback filter
pub fn init_with_default(
    fallback: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span covering one scoped block
pub fn scope_span(name: &str, resources: usize) -> Span {
    span!(Level::INFO, "scope", scope = %name, resources = %resources)
}

/// Emit a structured event for a resource entering the block
pub fn resource_acquired(id: &ResourceId) {
    debug!(index = id.index, resource = %id.label, "resource_acquired");
}

/// Emit a structured event for an absent slot
pub fn resource_absent(index: usize, phase: &str) {
    debug!(index = index, phase = %phase, "resource_absent");
}

/// Emit a structured event for a factory failure
pub fn acquisition_failed(index: usize, error: &Error) {
    warn!(index = index, error = %error, "acquisition_failed");
}

/// Emit a structured event for a clean release
pub fn resource_released(id: &ResourceId) {
    debug!(index = id.index, resource = %id.label, "resource_released");
}

/// Emit a structured event for a failed release
///
/// `suppressed` tells whether the failure ended up behind an earlier one.
pub fn release_failed(id: &ResourceId, error: &Error, suppressed: bool) {
    warn!(
        index = id.index,
        resource = %id.label,
        suppressed = suppressed,
        error = %error,
        "release_failed"
    );
}

/// Emit a structured event for a release failure nobody can observe
///
/// Used while unwinding a panic, where there is no outcome left to carry it.
pub fn release_failed_unwinding(id: &ResourceId, error: &Error) {
    error!(
        index = id.index,
        resource = %id.label,
        error = %error,
        "release_failed_during_unwind"
    );
}

/// Emit a structured event for block completion
pub fn scope_completed(name: &str, failures: usize) {
    if failures == 0 {
        info!(scope = %name, "scope_completed");
    } else {
        warn!(scope = %name, failures = failures, "scope_failed");
    }
}
