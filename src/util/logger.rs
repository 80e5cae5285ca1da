use log::SetLoggerError;

/// The environment variable holding the log filter, e.g. `GCPOLICY_LOG=debug`.
pub const LOG_FILTER_ENV: &str = "GCPOLICY_LOG";

/// Attempt to init a env_logger for the policy engine.
/// Does nothing if the "builtin_env_logger" feature is disabled.
/// A host runtime that installs its own logger gets an `Err`, which can be ignored.
pub fn try_init() -> Result<(), SetLoggerError> {
    cfg_if::cfg_if! {
        if #[cfg(feature = "builtin_env_logger")] {
            env_logger::try_init_from_env(
                // By default, use info level logging.
                env_logger::Env::new().filter_or(LOG_FILTER_ENV, "info"),
            )
        } else {
            Ok(())
        }
    }
}
