// tests/identity_fallback.rs

use snowdaemon::aws::identity::instance_id;
use snowdaemon_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn unreachable_metadata_endpoint_falls_back_to_hostname() {
    init_tracing();

    // Nothing listens here; the connection is refused immediately.
    let id = with_timeout(instance_id("http://127.0.0.1:1/latest/meta-data/instance-id")).await;

    assert!(!id.is_empty(), "fallback identity must never be empty");
}
