//! Logger module
//!
//! Provides logging utilities for the dashboard server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Fragment and freshness fallbacks
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::dashboard::error::{FragmentError, FreshnessError};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        &config.logging.level,
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Debug lines are dropped unless `logging.level = "debug"`
fn write_debug(message: &str) {
    if writer::get().is_some_and(writer::LogWriter::debug_enabled) {
        write_info(message);
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Dashboard server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    write_info(&format!("Fragment directory: {}", config.dashboard.fragment_dir));
    write_info(&format!("Data source: {}", config.dashboard.data_source));
    write_info(&format!("Default location: {}", config.dashboard.default_location));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_page_route(name: &str, path: &str, slots: usize) {
    write_info(&format!("[Pages] {path} -> {name} ({slots} slots)"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

/// Missing fragments are routine (unknown locations, partial pipeline runs);
/// rejected names and read errors are not.
pub fn log_fragment_unavailable(err: &FragmentError) {
    match err {
        FragmentError::NotFound { .. } => write_debug(&format!("[Fragment] {err}")),
        FragmentError::InvalidName { .. } | FragmentError::Io { .. } => {
            log_warning(&format!("[Fragment] {err}"));
        }
    }
}

pub fn log_freshness_unavailable(err: &FreshnessError) {
    log_warning(&format!("[Freshness] {err}"));
}

pub fn log_page_assembled(page: &str, location: &str, available: usize, total: usize) {
    write_debug(&format!(
        "[Page] {page} for '{location}': {available}/{total} fragments"
    ));
}

pub fn log_shutdown(signal: &str) {
    write_info(&format!("\n[Shutdown] {signal} received, stopping server"));
}
