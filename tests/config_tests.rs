use std::sync::Mutex;
use medai::config::{
  ClientConfig, API_KEY_ENV, API_URL_ENV, DEFAULT_API_URL, GROQ_API_KEY_ENV
};

/// Tests in this binary share the process environment
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], check: F)
{   let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for name in [API_KEY_ENV, GROQ_API_KEY_ENV, API_URL_ENV]
    {   std::env::remove_var(name);
    }
    for (name, value) in vars
    {   match value
        {   Some(v) => std::env::set_var(name, v)
          , None => std::env::remove_var(name)
        }
    }
    check();
    for name in [API_KEY_ENV, GROQ_API_KEY_ENV, API_URL_ENV]
    {   std::env::remove_var(name);
    }
}

#[test]
fn test_from_env_defaults()
{   with_env(&[], || {
      let config = ClientConfig::from_env();
      assert_eq!(config.api_url, DEFAULT_API_URL);
      assert!(config.api_key.is_none());
      assert!(!config.verbose);
    });
}

#[test]
fn test_from_env_prefers_medai_key()
{   with_env(
      &[(API_KEY_ENV, Some("mk")), (GROQ_API_KEY_ENV, Some("gk"))],
      || {
        assert_eq!(ClientConfig::from_env().api_key.as_deref(), Some("mk"));
      }
    );
}

#[test]
fn test_from_env_falls_back_to_groq_key()
{   with_env(&[(GROQ_API_KEY_ENV, Some("gk"))], || {
      assert_eq!(ClientConfig::from_env().api_key.as_deref(), Some("gk"));
    });
}

#[test]
fn test_from_env_blank_medai_key_falls_back()
{   with_env(
      &[(API_KEY_ENV, Some("")), (GROQ_API_KEY_ENV, Some("gk"))],
      || {
        assert_eq!(ClientConfig::from_env().api_key.as_deref(), Some("gk"));
      }
    );
}

#[test]
fn test_from_env_blank_keys_are_unset()
{   with_env(
      &[(API_KEY_ENV, Some("  ")), (GROQ_API_KEY_ENV, Some(""))],
      || {
        assert!(ClientConfig::from_env().api_key.is_none());
      }
    );
}

#[test]
fn test_from_env_url_override()
{   with_env(&[(API_URL_ENV, Some("http://localhost:8080/v1/chat/completions"))], || {
      let config = ClientConfig::from_env();
      assert_eq!(config.api_url, "http://localhost:8080/v1/chat/completions");
      assert!(config.validate().is_ok());
    });
}
