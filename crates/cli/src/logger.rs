use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for terminal output. `RUST_LOG` overrides the
/// default filter; `--verbose` lowers it to debug.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "ynab_peak=debug,ynab_peak_core=debug,info"
    } else {
        "ynab_peak=info,ynab_peak_core=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
