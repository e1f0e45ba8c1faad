use tracing_subscriber::{prelude::*, EnvFilter};

const APP_TARGETS: &[&str] = &[
    "shutterbox",
    "shutterbox_domain",
    "shutterbox_application",
    "shutterbox_adapters",
];

/// Logs go to stderr so command output on stdout stays clean.
pub fn init_logging() {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_new(filter_directives(&level)).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter),
        )
        .try_init();
}

fn filter_directives(level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(APP_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}
