use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Installs the color-eyre panic and error report hooks.
///
/// Call once at the top of `main`, before anything fallible. A second call is a no-op.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Default filter when `RUST_LOG` is unset.
fn default_directives(environment: &Environment) -> &'static str {
    if environment.is_production() {
        "info,tower_http=info,sea_orm=warn,sqlx=warn"
    } else {
        "debug,tower_http=debug,sea_orm=info,sqlx=warn"
    }
}

/// Installs the global subscriber: flattened JSON lines in production,
/// pretty multi-line output otherwise.
///
/// An [`ErrorLayer`](tracing_error::ErrorLayer) is always registered so eyre
/// reports carry span traces. `RUST_LOG` replaces the default filter, e.g.
/// `RUST_LOG=events_api=debug,sea_orm=warn`. Later calls keep the first
/// subscriber.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));

    let format = if environment.is_production() {
        fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
            .boxed()
    } else {
        fmt::layer().with_target(true).pretty().boxed()
    };

    let installed = tracing_subscriber::registry()
        .with(format)
        .with(tracing_error::ErrorLayer::default())
        .with(filter)
        .try_init();

    if installed.is_ok() {
        info!(?environment, "Tracing initialized");
    } else {
        debug!("Tracing already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_multiple_calls() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }

    #[test]
    fn test_init_tracing_with_rust_log_env() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            init_tracing(&Environment::Production);
        });
    }

    #[test]
    fn test_default_directives_quiet_the_orm_in_production() {
        assert!(default_directives(&Environment::Production).starts_with("info"));
        assert!(default_directives(&Environment::Development).contains("sea_orm=info"));
    }

    #[test]
    fn test_install_color_eyre_twice() {
        install_color_eyre();
        install_color_eyre();
    }
}
