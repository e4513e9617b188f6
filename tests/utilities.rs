//! Integration tests for the standalone helpers through the public API.

use chrono::{TimeZone, Utc};
use jmni_until::array::{difference, flatten_array, intersection, sort_array, unique_array, Nested};
use jmni_until::date::{format_date_in, format_with_timezone, DateInput};
use jmni_until::number::{pad_zero, pad_zero_str};
use jmni_until::query::{query_param, remove_query_param, set_query_param};
use jmni_until::signature::{generate_signature, verify_signature};
use jmni_until::string::{camel_to_snake, capitalize, snake_to_camel};
use jmni_until::user_agent::{device_kind, is_mobile, DeviceKind};
use jmni_until::UtilError;

#[test]
fn test_array_pipeline() {
    let nested = [
        Nested::item(3),
        Nested::list([Nested::item(1), Nested::list([Nested::item(3), Nested::item(2)])]),
        Nested::item(1),
    ];
    let flat = flatten_array(&nested);
    assert_eq!(flat, vec![3, 1, 3, 2, 1]);

    let unique = unique_array(&flat);
    assert_eq!(unique, vec![3, 1, 2]);
    assert_eq!(sort_array(&unique), vec![1, 2, 3]);

    assert_eq!(difference(&unique, &[2]), vec![3, 1]);
    assert_eq!(intersection(&unique, &[2, 3, 9]), vec![3, 2]);
}

#[test]
fn test_date_inputs_agree() {
    let instant = Utc.with_ymd_and_hms(2025, 4, 16, 6, 0, 0).unwrap();
    let from_millis = format_date_in(instant.timestamp_millis(), "yyyy-MM-dd HH:mm", &Utc).unwrap();
    let from_text = format_date_in("2025-04-16T06:00:00Z", "yyyy-MM-dd HH:mm", &Utc).unwrap();
    let from_instant = format_date_in(DateInput::Instant(instant), "yyyy-MM-dd HH:mm", &Utc).unwrap();

    assert_eq!(from_millis, "2025-04-16 06:00");
    assert_eq!(from_text, from_millis);
    assert_eq!(from_instant, from_millis);
}

#[test]
fn test_format_with_timezone_shanghai() {
    let out = format_with_timezone("2025-04-16T06:00:00Z", "Asia/Shanghai").unwrap();
    assert_eq!(out, "2025-04-16 14:00:00");

    let err = format_with_timezone("2025-04-16T06:00:00Z", "Not/AZone").unwrap_err();
    assert_eq!(err.kind(), "invalid timezone");
}

#[test]
fn test_query_round_trip_through_edits() {
    let url = "https://shop.example.com/list?page=1&size=20";
    let next = set_query_param(url, "page", "2").unwrap();
    assert_eq!(query_param(&next, "page").as_deref(), Some("2"));
    assert_eq!(query_param(&next, "size").as_deref(), Some("20"));

    let trimmed = remove_query_param(&next, "size").unwrap();
    assert_eq!(trimmed, "https://shop.example.com/list?page=2");
}

#[test]
fn test_padding() {
    assert_eq!(pad_zero(5), "05");
    assert_eq!(pad_zero_str("7").unwrap(), "07");
    assert!(matches!(pad_zero_str("abc"), Err(UtilError::InvalidNumber(_))));
}

#[test]
fn test_case_conversions_invert_each_other() {
    for snake in ["snake_case_string", "a_b_c", "plain"] {
        assert_eq!(camel_to_snake(&snake_to_camel(snake)), snake);
    }
    assert_eq!(capitalize(&snake_to_camel("user_name")), "UserName");
}

#[test]
fn test_device_detection() {
    let ua = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile Safari/537.36";
    assert!(is_mobile(ua));
    assert_eq!(device_kind(ua), DeviceKind::Mobile);
    assert_eq!(device_kind("curl/8.5.0"), DeviceKind::Desktop);
}

#[test]
fn test_signature_round_trip() {
    let params = generate_signature("shared-secret").unwrap();
    assert!(verify_signature("shared-secret", &params));

    let json = serde_json::to_string(&params).unwrap();
    let decoded = serde_json::from_str(&json).unwrap();
    assert!(verify_signature("shared-secret", &decoded));
}
