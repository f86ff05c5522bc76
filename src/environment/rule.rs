//! Custom detection rule evaluation.

use regex::{Regex, RegexBuilder};

use crate::config::schema::{CustomRule, RuleCondition};
use crate::context::RequestContext;

/// Characters accepted as pattern delimiters in `/…/flags` style patterns.
const PATTERN_DELIMITERS: &[char] = &['/', '#', '~'];

/// Flags a delimited pattern may carry.
const PATTERN_FLAGS: &str = "imsxuU";

/// Evaluate a rule against the request context.
///
/// `env_fn` resolves process variables for [`RuleCondition::EnvVar`], which
/// ignores the context entirely.
pub fn evaluate<F>(rule: &CustomRule, ctx: &RequestContext, env_fn: &F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let matched = match rule.condition {
        RuleCondition::EnvVar => env_fn(&rule.value).is_some(),
        condition => matches_condition(condition, ctx.field(&rule.field), &rule.value),
    };
    tracing::debug!(
        field = %rule.field,
        condition = ?rule.condition,
        value = %rule.value,
        matched,
        "Evaluated detection rule"
    );
    matched
}

/// Apply a string condition to `actual`.
///
/// [`RuleCondition::EnvVar`] and [`RuleCondition::Unknown`] never match here.
pub fn matches_condition(condition: RuleCondition, actual: &str, expected: &str) -> bool {
    match condition {
        RuleCondition::Equals => actual == expected,
        RuleCondition::Contains => actual.contains(expected),
        RuleCondition::StartsWith => actual.starts_with(expected),
        RuleCondition::EndsWith => actual.ends_with(expected),
        RuleCondition::Regex => match compile_pattern(expected) {
            Some(re) => re.is_match(actual),
            None => {
                tracing::warn!("Ignoring invalid detection pattern '{}'", expected);
                false
            }
        },
        RuleCondition::EnvVar | RuleCondition::Unknown => false,
    }
}

/// Compile a pattern, accepting either a bare regular expression or a
/// delimited one such as `/^dev\./i`.
///
/// Only `/`, `#` and `~` delimit, and only when everything after the
/// closing delimiter is a flag: `i`, `m`, `s`, `x` and `U`, with `u`
/// accepted and ignored. Any other string is compiled as a bare regular
/// expression. Returns `None` when the regular expression is invalid.
pub fn compile_pattern(pattern: &str) -> Option<Regex> {
    let (body, flags) = split_delimited(pattern).unwrap_or((pattern, ""));

    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'U' => builder.swap_greed(true),
            _ => &mut builder,
        };
    }
    builder.build().ok()
}

/// Split `/body/flags` into `(body, flags)` when `pattern` is delimited.
fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let delimiter = pattern.chars().next().filter(|c| PATTERN_DELIMITERS.contains(c))?;
    let close = pattern.rfind(delimiter).filter(|&i| i > 0)?;
    let flags = &pattern[close + 1..];
    if !flags.chars().all(|c| PATTERN_FLAGS.contains(c)) {
        return None;
    }
    Some((&pattern[1..close], flags))
}
