use tracing_subscriber::fmt::time::UtcTime;

/// Initialize a `tracing_subscriber`
///
/// Reports all the log events sent either with the `log` crate or the `tracing` crate.
///
/// If `debug` is `false` then only `error!`, `warn!` and `info!` are reported.
/// If `debug` is `true` then `debug!` and `trace!` are reported as well.
///
/// Events are written to stderr, leaving stdout to the command output.
pub fn initialise_tracing_subscriber(debug: bool) {
    let log_level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .with_max_level(log_level)
        .init();
}
