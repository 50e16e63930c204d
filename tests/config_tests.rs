use std::time::Duration;

use jobscout::config::{Config, ConfigError, DEFAULT_API_URL, DEFAULT_MODEL};

// Environment is process-wide, so every case runs inside one test.
#[test]
fn test_config_from_env() {
    unsafe {
        std::env::remove_var("GROQ_API_KEY");
        std::env::remove_var("GROQ_MODEL");
        std::env::remove_var("GROQ_API_URL");
        std::env::remove_var("IMAGE_FETCH_TIMEOUT_SECS");
    }
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::Missing("GROQ_API_KEY"))
    ));

    unsafe { std::env::set_var("GROQ_API_KEY", "   ") };
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::Missing("GROQ_API_KEY"))
    ));

    unsafe { std::env::set_var("GROQ_API_KEY", "gsk_test") };
    let config = Config::from_env().unwrap();
    assert_eq!(config.groq_api_key, "gsk_test");
    assert_eq!(config.groq_model, DEFAULT_MODEL);
    assert_eq!(config.groq_api_url, DEFAULT_API_URL);
    assert_eq!(config.image_fetch_timeout, Duration::from_secs(10));

    unsafe {
        std::env::set_var("GROQ_MODEL", "llama-3.3-70b-versatile");
        std::env::set_var("IMAGE_FETCH_TIMEOUT_SECS", "3");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.groq_model, "llama-3.3-70b-versatile");
    assert_eq!(config.image_fetch_timeout, Duration::from_secs(3));

    unsafe { std::env::set_var("IMAGE_FETCH_TIMEOUT_SECS", "soon") };
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::Invalid {
            key: "IMAGE_FETCH_TIMEOUT_SECS",
            ..
        })
    ));
}
