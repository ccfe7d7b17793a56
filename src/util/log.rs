/// Routes `log` output through the test harness, so `RUST_LOG=trace cargo test` shows it.
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}
