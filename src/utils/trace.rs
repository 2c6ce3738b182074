pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_ansi(false)
        .json()
        // try_init so repeated callers (e.g. test binaries) share the
        // first subscriber instead of panicking.
        .try_init();
}
