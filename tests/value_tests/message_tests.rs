//! Message Value Tests
//!
//! Tests for defaults, type-checked assignment, presence and merge.

use std::sync::Arc;

use vtproto::schemas::{replicationdata, vtctldata};
use vtproto::{
    FieldDescriptor, FieldKind, MessageDescriptor, MessageValue, ProtoError, Registry, Value,
};

fn event_descriptor() -> Arc<MessageDescriptor> {
    Arc::new(
        MessageDescriptor::new(
            "logutil",
            "Event",
            vec![
                FieldDescriptor::singular("file", 3, FieldKind::String),
                FieldDescriptor::singular("line", 4, FieldKind::Int64),
            ],
        )
        .unwrap(),
    )
}

fn registry() -> Registry {
    Registry::with_builtin_schemas().unwrap()
}

// =============================================================================
// Default Tests
// =============================================================================

#[test]
fn test_defaults_per_kind() {
    let registry = registry();
    let status = registry.new_message(replicationdata::STATUS).unwrap();

    assert_eq!(status.get("position").unwrap(), &Value::String(String::new()));
    assert_eq!(status.get("slave_io_running").unwrap(), &Value::Bool(false));
    assert_eq!(status.get("seconds_behind_master").unwrap(), &Value::Uint32(0));
    assert_eq!(status.get("master_port").unwrap(), &Value::Int32(0));

    let request = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_REQUEST).unwrap();
    assert_eq!(request.get("args").unwrap(), &Value::List(vec![]));
    assert_eq!(request.get("action_timeout").unwrap(), &Value::Int64(0));

    let response = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_RESPONSE).unwrap();
    assert_eq!(response.get("event").unwrap(), &Value::Message(None));
    assert!(response.get_message("event").unwrap().is_none());
}

#[test]
fn test_explicit_default_equals_untouched() {
    let registry = registry();
    let untouched = registry.new_message(replicationdata::STATUS).unwrap();

    let mut explicit = registry.new_message(replicationdata::STATUS).unwrap();
    explicit.set("master_port", 0).unwrap();
    explicit.set("position", "").unwrap();
    explicit.set("slave_sql_running", false).unwrap();

    assert_eq!(explicit, untouched);
    assert!(!explicit.has("master_port").unwrap());
}

// =============================================================================
// Assignment Tests
// =============================================================================

#[test]
fn test_set_and_get_typed() {
    let registry = registry();
    let mut status = registry.new_message(replicationdata::STATUS).unwrap();

    status.set("position", "MariaDB/0-1-1234").unwrap();
    status.set("slave_io_running", true).unwrap();
    status.set("seconds_behind_master", 12u32).unwrap();
    status.set("master_port", 3306).unwrap();

    assert_eq!(status.get_str("position").unwrap(), "MariaDB/0-1-1234");
    assert!(status.get_bool("slave_io_running").unwrap());
    assert_eq!(status.get_u64("seconds_behind_master").unwrap(), 12);
    assert_eq!(status.get_i64("master_port").unwrap(), 3306);
}

#[test]
fn test_set_unknown_field() {
    let registry = registry();
    let mut status = registry.new_message(replicationdata::STATUS).unwrap();

    let err = status.set("master_user", "root").unwrap_err();
    assert_eq!(
        err,
        ProtoError::UnknownField {
            message: "replicationdata.Status".to_string(),
            field: "master_user".to_string(),
        }
    );
}

#[test]
fn test_set_wrong_kind() {
    let registry = registry();
    let mut status = registry.new_message(replicationdata::STATUS).unwrap();

    assert!(matches!(
        status.set("master_port", "3306"),
        Err(ProtoError::TypeMismatch { .. })
    ));
    // int32 literal into a uint32 field
    assert!(matches!(
        status.set("seconds_behind_master", 5),
        Err(ProtoError::TypeMismatch { .. })
    ));
    // Unchanged after the failed assignments
    assert_eq!(status.get_i64("master_port").unwrap(), 0);
}

#[test]
fn test_set_repeated_requires_list() {
    let registry = registry();
    let mut request = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_REQUEST).unwrap();

    assert!(matches!(
        request.set("args", "ListAllTablets"),
        Err(ProtoError::TypeMismatch { .. })
    ));
    assert!(matches!(
        request.set("args", vec![1, 2]),
        Err(ProtoError::TypeMismatch { .. })
    ));

    request.set("args", vec!["ListAllTablets", "zone1"]).unwrap();
    assert_eq!(request.get_list("args").unwrap().len(), 2);
}

#[test]
fn test_push_appends_in_order() {
    let registry = registry();
    let mut request = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_REQUEST).unwrap();

    request.push("args", "a").unwrap();
    request.push("args", "b").unwrap();
    request.push("args", "c").unwrap();

    let args: Vec<&str> = request
        .get_list("args")
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(args, vec!["a", "b", "c"]);
}

#[test]
fn test_push_on_singular_field() {
    let registry = registry();
    let mut request = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_REQUEST).unwrap();

    assert!(matches!(
        request.push("action_timeout", 5i64),
        Err(ProtoError::TypeMismatch { .. })
    ));
}

#[test]
fn test_set_message_field() {
    let registry = registry();
    let mut response = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_RESPONSE).unwrap();

    let mut event = MessageValue::new(event_descriptor());
    event.set("file", "vtctl.go").unwrap();
    response.set("event", event.clone()).unwrap();

    assert!(response.has("event").unwrap());
    assert_eq!(response.get_message("event").unwrap(), Some(&event));
    assert_eq!(response.set_fields(), vec!["event"]);

    response.set("event", Value::Message(None)).unwrap();
    assert!(!response.has("event").unwrap());
}

#[test]
fn test_empty_message_is_present() {
    let registry = registry();
    let mut response = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_RESPONSE).unwrap();

    response.set("event", MessageValue::new(event_descriptor())).unwrap();
    assert!(response.has("event").unwrap());
    assert_ne!(
        response,
        registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_RESPONSE).unwrap()
    );
}

#[test]
fn test_set_message_of_wrong_type() {
    let registry = registry();
    let mut response = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_RESPONSE).unwrap();
    let status = registry.new_message(replicationdata::STATUS).unwrap();

    assert!(matches!(
        response.set("event", status),
        Err(ProtoError::TypeMismatch { .. })
    ));
}

#[test]
fn test_clear_resets_default() {
    let registry = registry();
    let mut request = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_REQUEST).unwrap();

    request.set("args", vec!["a"]).unwrap();
    request.set("action_timeout", 30i64).unwrap();
    request.clear("args").unwrap();
    request.clear("action_timeout").unwrap();

    assert_eq!(request.get("args").unwrap(), &Value::List(vec![]));
    assert!(request.set_fields().is_empty());
}

#[test]
fn test_set_fields_in_number_order() {
    let registry = registry();
    let mut status = registry.new_message(replicationdata::STATUS).unwrap();

    status.set("master_connect_retry", 10).unwrap();
    status.set("position", "pos").unwrap();
    status.set("master_host", "db1").unwrap();

    assert_eq!(status.set_fields(), vec!["position", "master_host", "master_connect_retry"]);
}

// =============================================================================
// Merge Tests
// =============================================================================

#[test]
fn test_merge_scalars_and_repeated() {
    let registry = registry();
    let mut base = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_REQUEST).unwrap();
    base.set("args", vec!["a"]).unwrap();
    base.set("action_timeout", 10i64).unwrap();

    let mut update = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_REQUEST).unwrap();
    update.set("args", vec!["b"]).unwrap();

    base.merge_from(&update).unwrap();

    assert_eq!(base.get_list("args").unwrap(), &[Value::from("a"), Value::from("b")]);
    // Default in the source does not overwrite
    assert_eq!(base.get_i64("action_timeout").unwrap(), 10);
}

#[test]
fn test_merge_nested_messages() {
    let registry = registry();

    let mut first = MessageValue::new(event_descriptor());
    first.set("file", "a.go").unwrap();
    let mut base = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_RESPONSE).unwrap();
    base.set("event", first).unwrap();

    let mut second = MessageValue::new(event_descriptor());
    second.set("line", 42i64).unwrap();
    let mut update = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_RESPONSE).unwrap();
    update.set("event", second).unwrap();

    base.merge_from(&update).unwrap();

    let event = base.get_message("event").unwrap().unwrap();
    assert_eq!(event.get_str("file").unwrap(), "a.go");
    assert_eq!(event.get_i64("line").unwrap(), 42);
}

#[test]
fn test_merge_different_types() {
    let registry = registry();
    let mut status = registry.new_message(replicationdata::STATUS).unwrap();
    let request = registry.new_message(vtctldata::EXECUTE_VTCTL_COMMAND_REQUEST).unwrap();

    assert!(matches!(
        status.merge_from(&request),
        Err(ProtoError::TypeMismatch { .. })
    ));
}
