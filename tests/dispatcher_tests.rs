// Method dispatcher tests: reply shapes, degraded sections, argument handling

mod common;

use common::{LIVE_PID, fake_dispatcher};
use serde_json::{Value, json};
use ubmonitor::dispatcher::*;
use ubmonitor::probe::SignalOutcome;

fn keys(response: &Response) -> Vec<&str> {
    let mut keys: Vec<&str> = response.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

#[test]
fn test_method_names_round_trip() {
    for method in Method::ALL {
        assert_eq!(method.name().parse::<Method>().unwrap(), method);
        assert_eq!(method.to_string(), method.name());
    }
    assert!("reboot".parse::<Method>().is_err());
    assert!("INFO".parse::<Method>().is_err());
}

#[test]
fn test_method_arguments() {
    assert_eq!(Method::Signal.arguments(), &["pid", "sig_id"]);
    assert_eq!(Method::Lookup.arguments(), &["pid"]);
    assert!(Method::Info.arguments().is_empty());
    assert!(Method::Net.arguments().is_empty());
}

#[test]
fn test_info_reports_every_section() {
    let (mut dispatcher, _) = fake_dispatcher(true);
    let response = dispatcher.call(Method::Info, &Value::Null);
    assert_eq!(
        keys(&response),
        vec![
            "cpu",
            "current_user",
            "memory",
            "network",
            "requested",
            "uptime"
        ]
    );
    assert_eq!(response["cpu"]["cpu_count"], 1);
    assert_eq!(response["cpu"]["cpus"][0]["vendor_id"], "GenuineIntel");
    assert_eq!(response["memory"]["memory_total"], 1024);
    assert_eq!(response["memory"]["memory_swap"]["m_swap_total"], 256);
    assert_eq!(response["network"]["interface_count"], 2);
    assert_eq!(response["current_user"], "root");
    assert_eq!(response["uptime"], "3600");
    assert!(response["requested"].as_i64().unwrap() > 0);
}

#[test]
fn test_info_degrades_failed_sections() {
    let (mut dispatcher, state) = fake_dispatcher(true);
    state.fail_memory();
    state.fail_network();
    let response = dispatcher.info();
    assert!(response.contains_key("cpu"));
    assert!(!response.contains_key("memory"));
    assert!(!response.contains_key("network"));
    assert_eq!(response["memory_msg"], FAILED_TO_OBTAIN);
    assert_eq!(response["network_msg"], FAILED_TO_OBTAIN);
    assert_eq!(response["current_user"], "root");
}

#[test]
fn test_info_repeated_keeps_cpu_parse_count() {
    let (mut dispatcher, state) = fake_dispatcher(true);
    dispatcher.info();
    dispatcher.info();
    assert_eq!(state.cpu_calls(), 1);
    assert_eq!(state.memory_calls(), 2);
}

#[test]
fn test_cpu_reply() {
    let (mut dispatcher, state) = fake_dispatcher(true);
    let response = dispatcher.call(Method::Cpu, &json!({}));
    assert_eq!(keys(&response), vec!["cpu", "requested"]);
    assert_eq!(response["cpu"]["cpus"][0]["cpu_mhz"], 2400.0);
    assert_eq!(response["cpu"]["cpus"][0]["cores"], 14);

    dispatcher.cpu();
    assert_eq!(state.cpu_calls(), 1);
}

#[test]
fn test_cpu_reply_when_unreadable() {
    let (mut dispatcher, state) = fake_dispatcher(false);
    state.fail_cpu();
    let response = dispatcher.cpu();
    assert_eq!(keys(&response), vec!["cpu_msg", "requested"]);
    assert_eq!(response["cpu_msg"], FAILED_TO_OBTAIN);
}

#[test]
fn test_mem_reply_reparses() {
    let (mut dispatcher, state) = fake_dispatcher(true);
    let response = dispatcher.mem();
    assert_eq!(keys(&response), vec!["memory", "requested"]);
    assert_eq!(response["memory"]["memory_free"], 512);
    dispatcher.mem();
    assert_eq!(state.memory_calls(), 2);

    state.fail_memory();
    let response = dispatcher.mem();
    assert_eq!(response["memory_msg"], FAILED_TO_OBTAIN);
}

#[test]
fn test_net_reply_is_flattened() {
    let (mut dispatcher, state) = fake_dispatcher(true);
    let response = dispatcher.call(Method::Net, &Value::Null);
    assert_eq!(
        keys(&response),
        vec!["interface_count", "interfaces", "requested"]
    );
    assert_eq!(response["interfaces"][0]["name"], "lo");
    assert_eq!(response["interfaces"][1]["flags"], 0x1043);

    state.fail_network();
    let response = dispatcher.net();
    assert_eq!(keys(&response), vec!["network_msg", "requested"]);
}

#[test]
fn test_signal_delivered() {
    let (mut dispatcher, _) = fake_dispatcher(true);
    let response = dispatcher.call(Method::Signal, &json!({"pid": LIVE_PID, "sig_id": 15}));
    assert_eq!(response["response"], SIGNAL_SENT);
    assert!(response.contains_key("requested"));
}

#[test]
fn test_signal_not_found_and_failure_messages() {
    let (mut dispatcher, state) = fake_dispatcher(true);
    state.set_signal_outcome(SignalOutcome::NotFound);
    let response = dispatcher.signal(&json!({"pid": 31337, "sig_id": 9}));
    assert_eq!(response["response"], "pid is not reserved");

    state.set_signal_outcome(SignalOutcome::Failed("Operation not permitted".into()));
    let response = dispatcher.signal(&json!({"pid": 1, "sig_id": 9}));
    assert_eq!(response["response"], "Operation not permitted");
}

#[test]
fn test_signal_argument_errors() {
    let (mut dispatcher, _) = fake_dispatcher(true);
    for args in [
        json!({"pid": 42}),
        json!({"sig_id": 9}),
        json!({"pid": "42", "sig_id": 9}),
        json!({"pid": 42, "sig_id": 9.5}),
        json!({"pid": 4_294_967_296_i64, "sig_id": 9}),
        Value::Null,
    ] {
        let response = dispatcher.signal(&args);
        assert_eq!(response["error"], ARGUMENT_ERROR, "args {args}");
        assert!(!response.contains_key("response"));
        assert!(response.contains_key("requested"));
    }
}

#[test]
fn test_signal_builds_snapshot_first() {
    let (mut dispatcher, state) = fake_dispatcher(true);
    dispatcher.signal(&json!({"pid": LIVE_PID, "sig_id": 0}));
    assert!(dispatcher.manager().snapshot().is_some());
    assert_eq!(state.cpu_calls(), 1);
}

#[test]
fn test_lookup_live_process() {
    let (mut dispatcher, _) = fake_dispatcher(true);
    let response = dispatcher.call(Method::Lookup, &json!({"pid": LIVE_PID}));
    assert_eq!(
        keys(&response),
        vec!["pid", "ppid", "process_name", "requested", "state"]
    );
    assert_eq!(response["process_name"], "dropbear");
    assert_eq!(response["pid"], 42);
    assert_eq!(response["ppid"], 1);
    assert_eq!(response["state"], "interruptible sleep");
}

#[test]
fn test_lookup_missing_process() {
    let (mut dispatcher, _) = fake_dispatcher(true);
    let response = dispatcher.lookup(&json!({"pid": 99999}));
    assert_eq!(keys(&response), vec!["error", "requested"]);
    assert_eq!(response["error"], LOOKUP_FAILED);
}

#[test]
fn test_lookup_missing_argument() {
    let (mut dispatcher, _) = fake_dispatcher(true);
    let response = dispatcher.lookup(&json!({"process": 42}));
    assert_eq!(response["error"], ARGUMENT_ERROR);
}

#[test]
fn test_every_reply_is_stamped() {
    let (mut dispatcher, _) = fake_dispatcher(true);
    let before = chrono::Utc::now().timestamp();
    for method in Method::ALL {
        let response = dispatcher.call(method, &json!({"pid": LIVE_PID, "sig_id": 0}));
        let requested = response["requested"].as_i64().unwrap();
        assert!(requested >= before, "{method} stamped {requested}");
    }
}
