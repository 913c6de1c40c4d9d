use env_logger::{Builder, Env};

const ENV_LOG: &str = "STUDIO_LOG";
const ENV_LOG_STYLE: &str = "STUDIO_LOG_STYLE";

fn builder() -> Builder {
    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    )
}

/// Setup logging from the env variables, with defaults.  Call once, early.
pub fn init() {
    builder().init();
}

/// Test variant of [`init`].  Output goes through the test harness and
/// repeated calls are fine.
pub fn init_for_tests() {
    let _ = builder().is_test(true).try_init();
}
