//! Global logging system.

use std::{
    fs::File,
    sync::Arc,
    env,
    panic,
};
use backtrace::Backtrace;
use tracing_subscriber::{
    fmt::{
        self,
        time::uptime,
    },
    prelude::*,
    Registry,
    EnvFilter,
};


/// Default logging environment filter. Our crates are debug, everything else is warn.
const DEFAULT_FILTER: &'static str = "warn,cube_physics=debug,cubeyard=debug";

/// Initializes a `tracing` logging backend which outputs to stdout and also a `log` file. Accepts
/// ecosystem-standard `RUST_LOG` env filters. Routes panics through the log too.
pub fn init_logging() {
    let format = fmt::format()
        .compact()
        .with_timer(uptime())
        .with_line_number(true);
    let stdout_log = fmt::layer()
        .event_format(format);

    let mut filter = DEFAULT_FILTER.to_owned();
    if let Ok(env_filter) = env::var(EnvFilter::DEFAULT_ENV) {
        filter.push(',');
        filter.push_str(&env_filter);
    }

    // the log file is a nicety, don't refuse to start without it
    let log_file_log = match File::create("log") {
        Ok(log_file) => Some(fmt::layer()
            .with_ansi(false)
            .with_writer(Arc::new(log_file))),
        Err(e) => {
            eprintln!("unable to create log file: {}", e);
            None
        }
    };

    let subscriber = Registry::default()
        .with(EnvFilter::new(filter))
        .with(stdout_log)
        .with(log_file_log);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("unable to install log subscriber: {}", e);
        return;
    }
    info!("starting program");

    // make panic messages and backtrace go through logging system
    panic::set_hook(Box::new(|info| {
        error!("{}", info);
        if env::var("RUST_BACKTRACE").map(|val| val == "1").unwrap_or(true) {
            error!("{:?}", Backtrace::new());
        }
    }));
    trace!("installed custom panic hook");
}
