use super::*;

#[test]
fn new_drops_trailing_slashes() {
    assert_eq!(ClientConfig::new("/api/").api_base(), "/api");
    assert_eq!(ClientConfig::new("https://example.org/api//").api_base(), "https://example.org/api");
}

#[test]
fn endpoint_joins_with_single_slash() {
    let config = ClientConfig::new("/api");
    assert_eq!(config.endpoint("auth/login"), "/api/auth/login");
    assert_eq!(config.endpoint("/auth/login"), "/api/auth/login");
}

#[test]
fn endpoint_works_with_absolute_base() {
    let config = ClientConfig::new("https://example.org/api");
    assert_eq!(config.endpoint("auth/current"), "https://example.org/api/auth/current");
}

#[test]
fn default_matches_build_env_constructor() {
    assert_eq!(ClientConfig::default(), ClientConfig::from_build_env());
}
