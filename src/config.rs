use serde::Deserialize;

/// Application settings, read from `Rocket.toml` and `ROCKET_*` variables
/// alongside Rocket's own configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(default = "default_gateway_url")]
    pub ai_gateway_url: String,
    #[serde(default = "default_model")]
    pub ai_model: String,
    #[serde(default)]
    pub ai_api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub ai_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub seed_demo_deal: bool,
    #[serde(default = "default_demo_deal_id")]
    pub demo_deal_id: String,
}

fn default_gateway_url() -> String {
    "https://ai.gateway.lovable.dev/v1".to_string()
}

fn default_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_demo_deal_id() -> String {
    "demo".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::figment::Figment;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: AppConfig = Figment::new().extract().unwrap();

        assert_eq!(config.ai_model, "google/gemini-2.5-flash");
        assert_eq!(config.ai_timeout_secs, 60);
        assert!(config.ai_api_key.is_none());
        assert!(config.seed_demo_deal);
    }

    #[test]
    fn provided_keys_override_defaults() {
        let config: AppConfig = Figment::new()
            .merge(("ai_api_key", "secret"))
            .merge(("seed_demo_deal", false))
            .extract()
            .unwrap();

        assert_eq!(config.ai_api_key.as_deref(), Some("secret"));
        assert!(!config.seed_demo_deal);
    }
}
