#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn load_json_misses_off_browser() {
    let value: Option<String> = load_json("any-key");
    assert!(value.is_none());
}

#[test]
fn save_json_is_noop_but_callable() {
    save_json("any-key", &"value");
}

#[test]
fn remove_is_noop_but_callable() {
    remove("any-key");
}
