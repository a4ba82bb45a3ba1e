//! Property-based tests for whole sessions.
//!
//! Random operator scripts run through the production `Runtime` against a
//! simulated peer. Invariants are checked on the wire transcript, which is
//! the only thing the peer ever observes.

use chatline_app::{Runtime, SessionEnd};
use chatline_harness::{SimDriver, SimPeer};
use proptest::prelude::*;

/// Operator lines mixing valid, malformed and out-of-state commands.
fn line_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        3 => Just("login alice pw1"),
        1 => Just("login alice bad"),
        1 => Just("login al pw1"),
        1 => Just("login all pw1"),
        1 => Just("newuser bob pw2"),
        2 => Just("who"),
        1 => Just("who extra"),
        1 => Just("logout"),
        1 => Just("logout now"),
        2 => Just("send all hi there"),
        1 => Just("send bob"),
        1 => Just("frobnicate"),
        1 => Just(""),
    ]
}

fn run_script(peer: SimPeer, lines: &[&str]) -> (SimDriver, SessionEnd) {
    let driver = SimDriver::with_peer(peer);
    for line in lines {
        driver.type_line(line);
    }

    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let end = runtime.block_on(Runtime::new(driver.clone()).run()).unwrap();
    (driver, end)
}

fn keyword(line: &[u8]) -> &str {
    std::str::from_utf8(line).unwrap().split_ascii_whitespace().next().unwrap_or("")
}

proptest! {
    #[test]
    fn prop_no_account_never_reaches_session_commands(
        lines in proptest::collection::vec(line_strategy(), 0..30)
    ) {
        let (driver, end) = run_script(SimPeer::new(), &lines);

        for line in driver.sent() {
            prop_assert!(matches!(keyword(&line), "login" | "newuser"), "sent {line:?}");
        }
        prop_assert_eq!(end, SessionEnd::InputClosed);
    }

    #[test]
    fn prop_wire_respects_session_state(
        lines in proptest::collection::vec(line_strategy(), 0..30)
    ) {
        let peer = SimPeer::new().with_account("alice", "pw1");
        let (driver, end) = run_script(peer, &lines);

        let mut authenticated = false;
        for line in driver.sent() {
            match keyword(&line) {
                "login" | "newuser" => {
                    prop_assert!(!authenticated, "sent {line:?} while logged in");
                },
                _ => prop_assert!(authenticated, "sent {line:?} while anonymous"),
            }
            if &line[..] == b"login alice pw1\n" {
                authenticated = true;
            }
            if &line[..] == b"logout\n" {
                authenticated = false;
            }
        }

        let logged_out = driver.sent().last().is_some_and(|line| &line[..] == b"logout\n");
        prop_assert_eq!(end == SessionEnd::LoggedOut, logged_out);
        prop_assert!(driver.is_stopped());
    }

    #[test]
    fn prop_every_line_gets_feedback_or_transmits(
        lines in proptest::collection::vec(line_strategy(), 0..20)
    ) {
        let peer = SimPeer::new().with_account("alice", "pw1").with_online("bob");
        let (driver, end) = run_script(peer, &lines);

        prop_assume!(end == SessionEnd::InputClosed);
        prop_assert!(driver.displayed().len() + driver.sent().len() >= lines.len());
    }
}
