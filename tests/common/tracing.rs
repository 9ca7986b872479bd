use std::sync::Once;

/// Initialize the global tracing subscriber once (used by tests that run with `RUST_LOG`).
///
/// Nothing is printed unless `RUST_LOG` asks for it.
pub fn init_tracing_from_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let env_filter = tracing_subscriber::EnvFilter::from_default_env();

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer();
        let _ = subscriber.try_init();
    });
}
