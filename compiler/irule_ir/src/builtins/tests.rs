use super::*;

#[test]
fn events() {
    assert_eq!(EVENTS.len(), 16);
    assert!(is_valid_event("HTTP_REQUEST"));
    assert!(is_valid_event("SSL_SERVERHELLO"));
    assert!(!is_valid_event("http_request"));
    assert!(!is_valid_event("HTTP_REQUEST_DATA"));
}

#[test]
fn headers_are_case_insensitive() {
    assert!(is_common_header("Host"));
    assert!(is_common_header("USER-AGENT"));
    assert!(!is_common_header("Hostname"));
}

#[test]
fn log_facilities() {
    assert!(is_log_facility("local0."));
    assert!(is_log_facility("local7.info"));
    assert!(!is_log_facility("local8.info"));
    assert!(!is_log_facility("local0"));
    assert!(!is_log_facility("remote0."));
}

#[test]
fn namespaces() {
    assert!(has_known_namespace("HTTP::fallback"));
    assert!(has_known_namespace("TCP::collect"));
    assert!(!has_known_namespace("IP::bogus"));
    assert!(!has_known_namespace("TCP::"));
    assert!(!has_known_namespace("tcp_collect"));
}

#[test]
fn string_operations() {
    assert_eq!(string_operation_arity("tolower"), Some(1));
    assert_eq!(string_operation_arity("range"), Some(3));
    assert_eq!(string_operation_arity("explode"), None);
    for op in [
        "contains", "equals", "tolower", "toupper", "length", "substring", "match", "map",
        "replace", "trim", "compare", "findstr", "reverse", "repeat", "range", "index", "last",
    ] {
        assert!(string_operation_arity(op).is_some(), "missing {op}");
    }
    assert_eq!(STRING_OPERATIONS.len(), 17);
}

#[test]
fn tcl_only_string_operations_are_rejected() {
    for op in ["first", "totitle", "is", "bytelength", "wordstart", "trimleft"] {
        assert_eq!(string_operation_arity(op), None, "{op} accepted");
    }
}

#[test]
fn option_sets() {
    assert!(is_regsub_flag("all"));
    assert!(!is_regsub_flag("line"));
    assert!(is_class_subcommand("match"));
    assert!(is_class_match_operator("starts_with"));
    assert!(!is_class_match_operator("eq"));
    assert!(is_http_header_subcommand("values"));
}

#[test]
fn common_identifiers() {
    assert!(is_common_identifier("log"));
    assert!(is_common_identifier("URI::decode"));
    assert!(!is_common_identifier("frobnicate"));
    assert!(is_reserved_keyword("foreach"));
    assert!(!is_reserved_keyword("host"));
}
