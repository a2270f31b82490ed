use std::env;

use config::{ConfigError, Map, Source, Value};

const PREFIX_PATTERN: &str = "CF_";

/// Credential variables read from the process environment.
pub const CREDENTIAL_VARS: [&str; 3] = ["CF_API_TOKEN", "CF_EMAIL", "CF_API_KEY"];

// Only whitelisted variables are pulled in, and the `CF_` prefix is
// stripped, matching `config::Environment::with_prefix("CF")`.
#[derive(Clone, Debug)]
pub struct Environment {
    whitelist: Vec<&'static str>,
}

impl Environment {
    pub fn with_whitelist(whitelist: Vec<&'static str>) -> Self {
        Environment { whitelist }
    }

    pub fn credentials() -> Self {
        Environment::with_whitelist(CREDENTIAL_VARS.to_vec())
    }
}

impl Source for Environment {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let mut m = Map::new();
        let uri: String = "env".into();

        for key in &self.whitelist {
            if let Ok(value) = env::var(key) {
                let key = key.strip_prefix(PREFIX_PATTERN).unwrap_or(key);
                m.insert(key.to_lowercase(), Value::new(Some(&uri), value));
            }
        }

        Ok(m)
    }
}

#[derive(Clone, Debug, Default)]
#[cfg(test)]
pub struct MockEnvironment {
    vars: Vec<(&'static str, &'static str)>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn set(&mut self, key: &'static str, value: &'static str) -> &mut Self {
        self.vars.push((key, value));
        self
    }
}

#[cfg(test)]
impl Source for MockEnvironment {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let mut m = Map::new();
        let uri: String = "env".into();

        for (key, value) in &self.vars {
            let key = key.strip_prefix(PREFIX_PATTERN).unwrap_or(key);
            m.insert(key.to_lowercase(), Value::new(Some(&uri), *value));
        }

        Ok(m)
    }
}
