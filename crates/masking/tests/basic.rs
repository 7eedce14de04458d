#![allow(clippy::unwrap_used)]

use masking::{ExposeInterface, PeekInterface, Secret, WithoutType};
use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
struct Credentials {
    api_key: String,
    secret_key: Secret<String>,
}

#[test]
fn debug_masks_inner_value() {
    let creds = Credentials {
        api_key: "pk_test_123".to_string(),
        secret_key: Secret::new("sk_test_456".to_string()),
    };

    let got = format!("{creds:?}");
    assert!(got.contains("pk_test_123"));
    assert!(!got.contains("sk_test_456"));
    assert!(got.contains("*** alloc::string::String ***"));
}

#[test]
fn debug_without_type() {
    let phone: Secret<String, WithoutType> = Secret::new("07700900000".to_string());
    assert_eq!(format!("{phone:?}"), "*** ***");
}

#[test]
fn serialize_is_explicit_opt_in() {
    let creds = Credentials {
        api_key: "pk".to_string(),
        secret_key: Secret::new("sk".to_string()),
    };

    // String is marked SerializableSecret, so the wire payload carries the
    // real value even though Debug masks it.
    let got = serde_json::to_string(&creds).unwrap();
    assert_eq!(got, r#"{"api_key":"pk","secret_key":"sk"}"#);
}

#[test]
fn peek_and_expose() {
    let secret = Secret::<String>::new("s3cret".to_string());
    assert_eq!(secret.peek(), "s3cret");
    assert_eq!(secret.expose(), "s3cret".to_string());
}

#[test]
fn deserialize_roundtrip() {
    let secret: Secret<String> = serde_json::from_str("\"tok_1\"").unwrap();
    assert_eq!(secret.peek(), "tok_1");
}
