use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// 預設篩選: `van_fleet=info`，verbose 時 `van_fleet=debug,info`
fn default_directive(level: Option<&str>, verbose: bool) -> String {
    match (verbose, level) {
        (true, _) => "van_fleet=debug,info".to_string(),
        (false, Some(level)) => format!("van_fleet={}", level),
        (false, None) => "van_fleet=info".to_string(),
    }
}

pub fn init_cli_logger(verbose: bool) {
    init_compact_logger(None, verbose);
}

pub fn init_compact_logger(level: Option<&str>, verbose: bool) {
    let filter = env_filter(&default_directive(level, verbose));

    // try_init: tests and embedding callers may already own the global subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}

pub fn init_json_logger(level: Option<&str>, verbose: bool) {
    let filter = env_filter(&default_directive(level, verbose));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(),
        )
        .try_init();
}
