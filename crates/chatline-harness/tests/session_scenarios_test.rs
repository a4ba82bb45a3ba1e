//! End-to-end session scenarios.
//!
//! Each test scripts what an operator types and what the peer does, runs the
//! production `Runtime` over a `SimDriver`, and checks the transcript: lines
//! on the wire, text shown to the operator and how the session ended.

use bytes::Bytes;
use chatline_app::{Runtime, RuntimeError, SessionEnd};
use chatline_harness::{SimDriver, SimDriverError, SimPeer};
use chatline_proto::reply::CAPACITY_NOTICE;

fn sent_lines(driver: &SimDriver) -> Vec<String> {
    driver.sent().iter().map(|line| String::from_utf8_lossy(line).into_owned()).collect()
}

async fn run(driver: &SimDriver) -> Result<SessionEnd, RuntimeError<SimDriverError>> {
    Runtime::new(driver.clone()).run().await
}

#[tokio::test]
async fn validation_login_and_listing() {
    let peer = SimPeer::new().with_account("abc", "pw1").with_online("carol");
    let driver = SimDriver::with_peer(peer);
    driver.type_line("login ab pw1");
    driver.type_line("login abc pw1");
    driver.type_line("logout extra");
    driver.type_line("who");

    let end = run(&driver).await.unwrap();

    assert_eq!(end, SessionEnd::InputClosed);
    assert_eq!(sent_lines(&driver), vec!["login abc pw1\n", "who\n"]);
    insta::assert_snapshot!(driver.displayed().join("\n"), @r"
    userID should be between 3 and 32 characters long.
    login successful
    Correct usage: logout
    abc, carol
    ");
    assert!(driver.is_stopped());
}

#[tokio::test]
async fn confirmed_logout_ends_session_before_further_input() {
    let driver = SimDriver::with_peer(SimPeer::new().with_account("alice", "pw1"));
    driver.type_line("login alice pw1");
    driver.type_line("logout");
    driver.type_line("who");

    let end = run(&driver).await.unwrap();

    assert_eq!(end, SessionEnd::LoggedOut);
    assert_eq!(sent_lines(&driver), vec!["login alice pw1\n", "logout\n"]);
    assert_eq!(driver.displayed(), vec!["login successful", "alice logout."]);
    assert!(driver.has_pending(), "input after logout must not be read");
    assert!(driver.is_stopped());
}

#[tokio::test]
async fn account_creation_does_not_log_in() {
    let driver = SimDriver::with_peer(SimPeer::new());
    driver.type_line("newuser dana pw4");
    driver.type_line("send all hi");
    driver.type_line("login dana pw4");
    driver.type_line("send all hi there");

    let end = run(&driver).await.unwrap();

    assert_eq!(end, SessionEnd::InputClosed);
    assert_eq!(
        sent_lines(&driver),
        vec!["newuser dana pw4\n", "login dana pw4\n", "send all hi there\n"]
    );
    insta::assert_snapshot!(driver.displayed().join("\n"), @r"
    New user account created. Please login.
    Denied. Please login first.
    login successful
    dana: hi there
    ");
}

#[tokio::test]
async fn denied_login_leaves_session_anonymous() {
    let driver = SimDriver::with_peer(SimPeer::new().with_account("alice", "pw1"));
    driver.type_line("login alice wrong");
    driver.type_line("who");

    run(&driver).await.unwrap();

    assert_eq!(sent_lines(&driver), vec!["login alice wrong\n"]);
    assert_eq!(
        driver.displayed(),
        vec!["Denied. User name or password incorrect.", "Denied. Please login first."]
    );
    assert_eq!(driver.peer().and_then(|peer| peer.logged_in().map(str::to_string)), None);
}

#[tokio::test]
async fn refused_logout_keeps_session() {
    let driver =
        SimDriver::with_peer(SimPeer::new().with_account("alice", "pw1").refusing_logout());
    driver.type_line("login alice pw1");
    driver.type_line("logout");
    driver.type_line("who");

    let end = run(&driver).await.unwrap();

    assert_eq!(end, SessionEnd::InputClosed);
    assert_eq!(sent_lines(&driver), vec!["login alice pw1\n", "logout\n", "who\n"]);
    assert_eq!(driver.displayed(), vec!["login successful", "Logout failed.", "alice"]);
}

#[tokio::test]
async fn second_login_is_denied_locally() {
    let driver = SimDriver::with_peer(SimPeer::new().with_account("alice", "pw1"));
    driver.type_line("login alice pw1");
    driver.type_line("newuser bob pw2");

    run(&driver).await.unwrap();

    assert_eq!(sent_lines(&driver), vec!["login alice pw1\n"]);
    assert_eq!(driver.displayed(), vec!["login successful", "Denied. User already logged in."]);
}

#[tokio::test]
async fn full_server_ends_session_without_reading_input() {
    let driver = SimDriver::with_peer(SimPeer::new().at_capacity());
    driver.type_line("login abc pw1");

    let end = run(&driver).await.unwrap();

    assert_eq!(end, SessionEnd::ServerFull);
    assert!(driver.sent().is_empty());
    assert_eq!(driver.displayed(), vec![CAPACITY_NOTICE]);
    assert!(driver.has_pending());
    assert!(driver.is_stopped());
}

#[tokio::test]
async fn capacity_notice_mid_session_is_terminal() {
    let driver = SimDriver::with_peer(SimPeer::new().with_account("alice", "pw1"));
    driver.type_line("login alice pw1");
    driver.inject_broadcast(Bytes::from_static(CAPACITY_NOTICE.as_bytes()));
    driver.type_line("who");

    let end = run(&driver).await.unwrap();

    assert_eq!(end, SessionEnd::ServerFull);
    assert_eq!(sent_lines(&driver), vec!["login alice pw1\n"]);
}

#[tokio::test]
async fn broadcasts_are_displayed_verbatim() {
    let driver = SimDriver::new();
    driver.inject_broadcast("bob: anyone around?");

    run(&driver).await.unwrap();

    assert_eq!(driver.displayed(), vec!["bob: anyone around?"]);
}

#[tokio::test]
async fn connection_loss_is_fatal_and_stops_driver() {
    let driver = SimDriver::new();
    driver.inject_disconnect();
    driver.type_line("who");

    let result = run(&driver).await;

    assert!(matches!(result, Err(RuntimeError::Driver(SimDriverError::Disconnected))));
    assert!(driver.is_stopped());
}

#[tokio::test]
async fn silent_peer_after_request_is_fatal() {
    let driver = SimDriver::new();
    driver.type_line("login alice pw1");

    let result = run(&driver).await;

    assert!(matches!(result, Err(RuntimeError::Driver(SimDriverError::NoReply))));
    assert_eq!(sent_lines(&driver), vec!["login alice pw1\n"]);
    assert!(driver.is_stopped());
}

#[tokio::test]
async fn scripted_replies_without_peer() {
    let driver = SimDriver::new();
    driver.type_line("login alice pw1");
    driver.inject_reply("login successful");
    driver.type_line("who");
    driver.inject_reply("alice, bob");

    run(&driver).await.unwrap();

    assert_eq!(driver.displayed(), vec!["login successful", "alice, bob"]);
}

#[tokio::test]
async fn oversized_broadcast_is_fatal() {
    let driver = SimDriver::new();
    driver.inject_broadcast(vec![b'x'; chatline_proto::MAX_LINE + 1]);

    let result = run(&driver).await;

    assert!(matches!(result, Err(RuntimeError::Client(_))));
    assert!(driver.is_stopped());
}
