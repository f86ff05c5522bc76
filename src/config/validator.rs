//! Configuration presence checks.
//!
//! Detection tolerates incomplete configuration, so these checks never
//! block loading. They exist so `sitewise validate` can point out values
//! that will silently score zero:
//! - Protocols other than `http` / `https`
//! - Empty domains, and rule patterns that are not valid regular expressions
//! - Rules that inspect nothing (empty value on a non-`env_var` rule)
//! - Blank environment names

use crate::config::schema::{EnvironmentSpec, RuleCondition, SiteConfig};
use crate::environment::rule::compile_pattern;
use crate::error::{Result, SitewiseError};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Environment name if the error is environment-specific
    pub environment: Option<String>,
}

impl ValidationError {
    fn new(rule: &str, message: String, environment: &str) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            environment: Some(environment.to_string()),
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &SiteConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.override_var.trim().is_empty() {
        errors.push(ValidationError {
            rule: "empty-override-var".to_string(),
            message: "override_var must name a process variable".to_string(),
            environment: None,
        });
    }

    for (name, spec) in config.environments.iter() {
        errors.extend(validate_environment(name, spec));
    }

    errors
}

fn validate_environment(name: &str, spec: &EnvironmentSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(ValidationError::new(
            "blank-environment-name",
            "Environment names must not be blank".to_string(),
            name,
        ));
    }

    if let Some(protocol) = &spec.protocol {
        let lower = protocol.to_ascii_lowercase();
        if lower != "http" && lower != "https" {
            errors.push(ValidationError::new(
                "invalid-protocol",
                format!(
                    "Environment '{}' has protocol '{}'; expected http or https",
                    name, protocol
                ),
                name,
            ));
        }
    }

    if let Some(domain) = &spec.domain {
        if domain.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-domain",
                format!("Environment '{}' has an empty domain", name),
                name,
            ));
        }
    }

    for (index, rule) in spec.detection_rules.iter().enumerate() {
        match rule.condition {
            RuleCondition::Unknown => errors.push(ValidationError::new(
                "unknown-condition",
                format!(
                    "Environment '{}' rule #{} has an unknown condition and never matches",
                    name,
                    index + 1
                ),
                name,
            )),
            RuleCondition::Regex if compile_pattern(&rule.value).is_none() => {
                errors.push(ValidationError::new(
                    "invalid-rule-pattern",
                    format!(
                        "Environment '{}' rule #{} pattern '{}' is not a valid regular expression",
                        name,
                        index + 1,
                        rule.value
                    ),
                    name,
                ))
            }
            RuleCondition::EnvVar | RuleCondition::Regex => {}
            _ if rule.value.is_empty() => errors.push(ValidationError::new(
                "empty-rule-value",
                format!(
                    "Environment '{}' rule #{} has no value to compare against",
                    name,
                    index + 1
                ),
                name,
            )),
            _ => {}
        }
    }

    errors
}

/// Validate a configuration, failing on the first batch of errors.
pub fn validate(config: &SiteConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(SitewiseError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
