//! Failure paths: each error surfaces with the right kind and no config.

use std::time::{Duration, Instant};

use autodisco::{poll, DiscoveryError, ErrorKind, ProtocolError};

use crate::helpers::{closed_endpoint, Behavior, FakeConfigServer};

async fn poll_err(reply: &[u8]) -> DiscoveryError {
    let server = FakeConfigServer::replying(reply).await;
    poll(&server.endpoint(), Duration::from_secs(1))
        .await
        .expect_err("poll should fail")
}

#[tokio::test]
async fn wrong_prefix_is_decode_error() {
    let err = poll_err(b"VALUE cluster 0 147\r\n12\r\nh|10.0.0.1|11211\n\r\nEND\r\n").await;

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(matches!(
        err,
        DiscoveryError::Decode(ProtocolError::InvalidHeader { .. })
    ));
}

#[tokio::test]
async fn unsupported_command_is_decode_error() {
    // plain memcached answers an unknown command with ERROR
    let err = poll_err(b"ERROR\r\n").await;
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn non_numeric_version_is_decode_error() {
    let err = poll_err(b"CONFIG cluster 0 20\r\nabc\r\nh|10.0.0.1|11211\n\r\nEND\r\n").await;
    assert!(matches!(
        err,
        DiscoveryError::Decode(ProtocolError::InvalidVersion(ref v)) if v == "abc"
    ));
}

#[tokio::test]
async fn malformed_descriptor_is_decode_error() {
    let err = poll_err(b"CONFIG cluster 0 20\r\n1\r\nh|10.0.0.1\n\r\nEND\r\n").await;
    assert!(matches!(
        err,
        DiscoveryError::Decode(ProtocolError::InvalidNodeFields { fields: 2, .. })
    ));
}

#[tokio::test]
async fn non_numeric_port_is_decode_error() {
    let err = poll_err(b"CONFIG cluster 0 20\r\n1\r\nh|10.0.0.1|xx\n\r\nEND\r\n").await;
    assert!(matches!(
        err,
        DiscoveryError::Decode(ProtocolError::InvalidPort { .. })
    ));
}

#[tokio::test]
async fn wrong_terminator_is_decode_error() {
    let err = poll_err(b"CONFIG cluster 0 20\r\n1\r\nh|10.0.0.1|11211\n\r\nEND!\r\n").await;
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.to_string().contains(r#"expected "END\r\n""#), "got: {err}");
}

#[tokio::test]
async fn truncated_after_node_line_is_read_error() {
    let err = poll_err(b"CONFIG cluster 0 20\r\n1\r\nh|10.0.0.1|11211\n").await;
    assert_eq!(err.kind(), ErrorKind::Read);
    assert!(matches!(err, DiscoveryError::Disconnected));
}

#[tokio::test]
async fn missing_blank_line_fails_in_strict_mode() {
    let err = poll_err(b"CONFIG cluster 0 20\r\n1\r\nh|10.0.0.1|11211\nEND\r\n").await;
    assert_eq!(err.kind(), ErrorKind::Read);
}

#[tokio::test]
async fn empty_reply_is_read_error() {
    let err = poll_err(b"").await;
    assert!(matches!(err, DiscoveryError::Disconnected));
}

#[tokio::test]
async fn silent_endpoint_times_out() {
    let server = FakeConfigServer::start(Behavior::Stall).await;

    let started = Instant::now();
    let err = poll(&server.endpoint(), Duration::from_millis(200))
        .await
        .expect_err("poll should time out");

    assert!(matches!(err, DiscoveryError::ReadTimeout(_)));
    assert_eq!(err.kind(), ErrorKind::Read);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn zero_timeout_waits_one_second_for_reply() {
    let server = FakeConfigServer::start(Behavior::Stall).await;

    let started = Instant::now();
    let err = poll(&server.endpoint(), Duration::ZERO)
        .await
        .expect_err("poll should time out");

    match err {
        DiscoveryError::ReadTimeout(timeout) => assert_eq!(timeout, Duration::from_secs(1)),
        other => panic!("expected ReadTimeout, got {other:?}"),
    }
    let elapsed = started.elapsed();
    assert!(
        elapsed >= Duration::from_millis(900) && elapsed < Duration::from_secs(5),
        "waited {elapsed:?}"
    );
}

// -- connection is closed on every exit path --

#[tokio::test]
async fn connection_closed_after_decode_error() {
    let server = FakeConfigServer::start(Behavior::ReplyAndWait(b"ERROR\r\n".to_vec())).await;

    let err = poll(&server.endpoint(), Duration::from_secs(1))
        .await
        .expect_err("poll should fail");

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(
        server.wait_for_client_closes(1, Duration::from_secs(2)).await,
        "endpoint never saw the client hang up"
    );
}

#[tokio::test]
async fn connection_closed_after_read_timeout() {
    let server = FakeConfigServer::start(Behavior::Stall).await;

    let err = poll(&server.endpoint(), Duration::from_millis(200))
        .await
        .expect_err("poll should time out");

    assert_eq!(err.kind(), ErrorKind::Read);
    assert!(
        server.wait_for_client_closes(1, Duration::from_secs(2)).await,
        "endpoint never saw the client hang up"
    );
}

#[tokio::test]
async fn connection_closed_after_truncated_reply() {
    // the endpoint stops mid-reply but keeps its side open
    let server = FakeConfigServer::start(Behavior::ReplyAndWait(
        b"CONFIG cluster 0 20\r\n1\r\n".to_vec(),
    ))
    .await;

    let err = poll(&server.endpoint(), Duration::from_millis(200))
        .await
        .expect_err("poll should fail");

    assert!(matches!(err, DiscoveryError::ReadTimeout(_)));
    assert!(server.wait_for_client_closes(1, Duration::from_secs(2)).await);
}

#[tokio::test]
async fn closed_port_is_connection_error() {
    let endpoint = closed_endpoint().await;

    let err = poll(&endpoint, Duration::ZERO)
        .await
        .expect_err("dial should fail");

    assert_eq!(err.kind(), ErrorKind::Connection);
}

#[tokio::test]
async fn default_timeout_bounds_the_dial() {
    // non-routable: either times out or is rejected by the network stack,
    // but never takes much longer than the 1 second default
    let started = Instant::now();
    let err = poll("10.255.255.1:11211", Duration::ZERO)
        .await
        .expect_err("dial should fail");

    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(started.elapsed() < Duration::from_secs(3));
    if let DiscoveryError::ConnectTimeout { timeout, .. } = err {
        assert_eq!(timeout, Duration::from_secs(1));
    }
}

#[tokio::test]
async fn unresolvable_host_is_connection_error() {
    let err = poll("no-such-host.invalid:11211", Duration::from_secs(2))
        .await
        .expect_err("dial should fail");
    assert_eq!(err.kind(), ErrorKind::Connection);
}
