use std::fmt;
use std::str::FromStr;

use super::SettingsError;

/// Deployment environment, mapped to the store's top-level path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Path segment the environment's parameters live under.
    pub fn scope(&self) -> &'static str {
        match self {
            Environment::Development => "Dev",
            Environment::Production => "Prod",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => Err(SettingsError::InvalidEnvironment(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope() {
        let tests = [("development", "Dev"), ("production", "Prod")];
        for (name, scope) in tests {
            let env: Environment = name.parse().unwrap();
            assert_eq!(env.scope(), scope);
            assert_eq!(env.to_string(), name);
        }
    }

    #[test]
    fn test_invalid_environment() {
        let result = "staging".parse::<Environment>();
        assert!(matches!(result, Err(SettingsError::InvalidEnvironment(ref name)) if name == "staging"));
    }
}
