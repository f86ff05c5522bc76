//! Layered merging of configuration files.
//!
//! A project config can be adjusted per machine with
//! `.sitewise/config.local.yml`. The local file is laid over the project
//! file with these rules:
//!
//! - Mappings merge key by key, recursively
//! - Sequences and scalars in the overlay replace the base value
//! - A null in the overlay removes the key
//!
//! Key order is preserved, since environment order breaks score ties.

use serde_yaml::Value;

/// Lay `overlay` over `base`, returning the combined value.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in overlay_map {
                if value.is_null() {
                    merged.shift_remove(key);
                    continue;
                }
                let combined = match base_map.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), combined);
            }
            Value::Mapping(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Merge layers in order; later layers win.
pub fn merge_configs(layers: &[Value]) -> Value {
    layers
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn local_override_changes_single_field() {
        let base = yaml(
            r#"
environments:
  development:
    domain: localhost
    protocol: http
"#,
        );
        let local = yaml(
            r#"
environments:
  development:
    domain: dev.test
"#,
        );

        let merged = deep_merge(&base, &local);
        assert_eq!(merged["environments"]["development"]["domain"], "dev.test");
        assert_eq!(merged["environments"]["development"]["protocol"], "http");
    }

    #[test]
    fn rule_lists_are_replaced() {
        let base = yaml(
            r#"
detection_rules:
  - { value: a }
  - { value: b }
"#,
        );
        let local = yaml("detection_rules: [{ value: c }]");

        let merged = deep_merge(&base, &local);
        let rules = merged["detection_rules"].as_sequence().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0]["value"], "c");
    }

    #[test]
    fn null_removes_environment() {
        let base = yaml(
            r#"
environments:
  staging: { domain: staging.example.com }
  production: { domain: example.com }
"#,
        );
        let local = yaml("environments: { staging: ~ }");

        let merged = deep_merge(&base, &local);
        let envs = merged["environments"].as_mapping().unwrap();
        assert_eq!(envs.len(), 1);
        assert!(envs.contains_key("production"));
    }

    #[test]
    fn new_environment_is_appended() {
        let base = yaml("environments: { production: { domain: example.com } }");
        let local = yaml("environments: { local: { domain: localhost } }");

        let merged = deep_merge(&base, &local);
        let names: Vec<_> = merged["environments"]
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["production", "local"]);
    }

    #[test]
    fn merge_configs_applies_layers_in_order() {
        let layers = vec![
            yaml("app_name: First\noverride_var: A"),
            yaml("app_name: Second"),
            yaml("override_var: C"),
        ];
        let merged = merge_configs(&layers);
        assert_eq!(merged["app_name"], "Second");
        assert_eq!(merged["override_var"], "C");
    }

    #[test]
    fn merge_configs_empty_is_empty_mapping() {
        let merged = merge_configs(&[]);
        assert!(merged.as_mapping().unwrap().is_empty());
    }
}
