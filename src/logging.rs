/// Initialises `env_logger` at `info` unless `RUST_LOG` says otherwise.
/// Safe to call more than once.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialised");
    }
}
