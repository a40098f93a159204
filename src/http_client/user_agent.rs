//! User agent handling for HTTP requests.

pub const USER_AGENT: &str = concat!(
    "consentmap/",
    env!("CARGO_PKG_VERSION"),
    " (choropleth renderer)"
);

/// Resolve user agent from config value.
/// - None or empty => default consentmap user agent
/// - other => custom user agent string
pub fn resolve_user_agent(config: Option<&str>) -> String {
    match config {
        None | Some("") => USER_AGENT.to_string(),
        Some(custom) => custom.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_user_agent_default() {
        let ua = resolve_user_agent(None);
        assert!(ua.starts_with("consentmap/"));
        assert_eq!(resolve_user_agent(Some("")), ua);
    }

    #[test]
    fn test_resolve_user_agent_custom() {
        let ua = resolve_user_agent(Some("MyBot/1.0"));
        assert_eq!(ua, "MyBot/1.0");
    }
}
