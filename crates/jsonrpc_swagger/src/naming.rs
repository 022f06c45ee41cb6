//! Identifier naming policies applied to method, parameter and property names.

use std::str::FromStr;

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::Deserialize;

use crate::error::ConfigError;

/// `Custom` policies compare equal only when they hold the same function address.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub enum NamingPolicy {
    /// Names are emitted as declared
    #[serde(rename = "identity")]
    Identity,
    #[default]
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(skip)]
    Custom(fn(&str) -> String),
}

impl NamingPolicy {
    pub fn convert_name(&self, name: &str) -> String {
        match self {
            Self::Identity => name.to_string(),
            Self::CamelCase => name.to_lower_camel_case(),
            Self::PascalCase => name.to_upper_camel_case(),
            Self::SnakeCase => name.to_snake_case(),
            Self::KebabCase => name.to_kebab_case(),
            Self::Custom(convert) => convert(name),
        }
    }
}

impl PartialEq for NamingPolicy {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for NamingPolicy {}

impl FromStr for NamingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "identity" | "none" => Ok(Self::Identity),
            "camelCase" | "camel" => Ok(Self::CamelCase),
            "PascalCase" | "pascal" => Ok(Self::PascalCase),
            "snake_case" | "snake" => Ok(Self::SnakeCase),
            "kebab-case" | "kebab" => Ok(Self::KebabCase),
            other => Err(ConfigError::Parse {
                key: "naming_policy".to_string(),
                details: format!("unknown naming policy \"{other}\""),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NamingPolicy::Identity, "GetWeather", "GetWeather")]
    #[case(NamingPolicy::CamelCase, "GetWeather", "getWeather")]
    #[case(NamingPolicy::CamelCase, "get_weather", "getWeather")]
    #[case(NamingPolicy::CamelCase, "Ping", "ping")]
    #[case(NamingPolicy::PascalCase, "get_weather", "GetWeather")]
    #[case(NamingPolicy::SnakeCase, "GetWeather", "get_weather")]
    #[case(NamingPolicy::KebabCase, "GetWeather", "get-weather")]
    fn test_convert_name(#[case] policy: NamingPolicy, #[case] input: &str, #[case] expected: &str) {
        assert_eq!(policy.convert_name(input), expected);
    }

    #[test]
    fn test_equality() {
        let upper = NamingPolicy::Custom(|name| name.to_uppercase());
        assert_eq!(upper, upper);
        assert_ne!(upper, NamingPolicy::Identity);
        assert_ne!(NamingPolicy::CamelCase, NamingPolicy::PascalCase);
        assert_eq!(NamingPolicy::default(), NamingPolicy::CamelCase);
    }

    #[test]
    fn test_custom_policy() {
        let policy = NamingPolicy::Custom(|name| name.to_uppercase());
        assert_eq!(policy.convert_name("ping"), "PING");
    }

    #[rstest]
    #[case("identity", NamingPolicy::Identity)]
    #[case("camelCase", NamingPolicy::CamelCase)]
    #[case(" snake_case ", NamingPolicy::SnakeCase)]
    #[case("kebab", NamingPolicy::KebabCase)]
    fn test_from_str(#[case] input: &str, #[case] expected: NamingPolicy) {
        assert_eq!(input.parse::<NamingPolicy>().unwrap(), expected);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(matches!(
            "SCREAMING".parse::<NamingPolicy>(),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_deserialize() {
        let policy: NamingPolicy = serde_json::from_str("\"snake_case\"").unwrap();
        assert_eq!(policy, NamingPolicy::SnakeCase);
    }
}
