// Shutdown signal module
//
// SIGTERM and SIGINT stop the server; elsewhere only Ctrl+C is supported.

/// Resolve once a shutdown signal arrives, yielding its name
#[cfg(unix)]
pub async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigterm, mut sigint) = match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) {
        (Ok(term), Ok(int)) => (term, int),
        (Err(e), _) | (_, Err(e)) => {
            crate::logger::log_warning(&format!(
                "Failed to register signal handlers ({e}), falling back to Ctrl+C"
            ));
            return ctrl_c().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    }
}

#[cfg(not(unix))]
pub async fn shutdown_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        crate::logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
        // Without a signal source, run until the process is killed
        std::future::pending::<()>().await;
    }
    "Ctrl+C"
}
