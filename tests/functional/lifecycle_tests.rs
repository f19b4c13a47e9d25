//! Create/read/update/delete scenarios against the live API.

use std::fs;

use chrono::{DateTime, Utc};

use super::{FunctionalTestContext, test_hostname};

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_basic_create_sets_defaults_and_timestamps() {
    let ctx = FunctionalTestContext::new();
    let start = Utc::now() - chrono::Duration::minutes(1);
    let hostname = test_hostname(&ctx.domain);
    ctx.declare(&hostname, "tcp://128.66.0.1:23");

    ctx.run_success(&["create"]);

    let state = ctx.state();
    assert!(!ctx.state_id().is_empty());
    assert_eq!(state["protocol"], "tcp/22");
    assert_eq!(state["dns"]["type"], "CNAME");
    assert_eq!(state["dns"]["name"], hostname.as_str());
    assert_eq!(state["origin_direct"][0], "tcp://128.66.0.1:23");
    assert_eq!(state["tls"], "off");
    assert_eq!(state["ip_firewall"], true);
    assert_eq!(state["proxy_protocol"], false);

    for field in ["created_on", "modified_on"] {
        let ts = state[field].as_str().unwrap();
        let parsed = DateTime::parse_from_rfc3339(ts).unwrap();
        assert!(parsed >= start, "{field} {ts} predates the test");
    }
}

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_update_keeps_id() {
    let ctx = FunctionalTestContext::new();
    let hostname = test_hostname(&ctx.domain);
    ctx.declare(&hostname, "tcp://128.66.0.1:23");
    ctx.run_success(&["create"]);
    let initial_id = ctx.state_id();

    ctx.declare(&hostname, "tcp://128.66.0.2:23");
    ctx.run_success(&["update"]);

    assert_eq!(ctx.state_id(), initial_id);
    assert_eq!(ctx.state()["origin_direct"][0], "tcp://128.66.0.2:23");
}

#[test]
#[cfg_attr(not(feature = "functional-tests"), ignore)]
fn test_create_after_manual_destroy() {
    let ctx = FunctionalTestContext::new();
    let hostname = test_hostname(&ctx.domain);
    ctx.declare(&hostname, "tcp://128.66.0.1:23");
    ctx.run_success(&["create"]);
    let initial_id = ctx.state_id();

    // Delete out of band through a copy of the state file
    let copy = ctx.dir.path().join("out-of-band.state.json");
    fs::copy(ctx.state_path(), &copy).unwrap();
    ctx.run_success(&["delete", "--yes", "--state", copy.to_str().unwrap()]);

    ctx.run_success(&["read"]);
    assert!(ctx.state_id().is_empty());

    ctx.run_success(&["create"]);
    let new_id = ctx.state_id();
    assert!(!new_id.is_empty());
    assert_ne!(new_id, initial_id);
}
