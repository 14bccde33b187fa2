pub mod synthetic_image;

/// Route the pipeline's `debug!` output through the test harness.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
