#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;

use anyhow::Result;
use clap::ArgMatches;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    GoogleApiKey,
    GoogleUrl,
    GroqApiKey,
    GroqUrl,
    Model,
    Username,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        let res = match key {
            ConfigKey::GoogleApiKey => "",
            ConfigKey::GoogleUrl => "https://generativelanguage.googleapis.com",
            ConfigKey::GroqApiKey => "",
            ConfigKey::GroqUrl => "https://api.groq.com/openai",
            ConfigKey::Model => "",
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    /// Applies defaults for every key, then any values carried by the clap
    /// matches. Args declare env fallbacks, so environment variables arrive
    /// here through the matches as well. Credentials are read exactly once
    /// per process run.
    pub fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key));
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val);
                }
            }
        }

        tracing::debug!(
            username = Config::get(ConfigKey::Username),
            google_url = Config::get(ConfigKey::GoogleUrl),
            groq_url = Config::get(ConfigKey::GroqUrl),
            google_key_set = !Config::get(ConfigKey::GoogleApiKey).is_empty(),
            groq_key_set = !Config::get(ConfigKey::GroqApiKey).is_empty(),
            model = Config::get(ConfigKey::Model),
            "config"
        );

        return Ok(());
    }
}
