//! Property tests run against the public API only.

mod avl;
mod search_tree;

use tracing_subscriber::EnvFilter;

/// Routes the crate's log events through the test harness. Set `RUST_LOG=bintree=trace` to see
/// them.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
