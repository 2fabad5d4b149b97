//! Tagging configuration.

use crate::token::TokenTypeSet;

/// Options recognised by the tagging pipeline.
///
/// A small, cheaply cloned struct passed by reference into the engine.
#[derive(Debug, Clone)]
pub struct Config {
    pub excluded_token_types: TokenTypeSet,
    pub allow_overlapping_tags: bool,
    pub return_untagged_tags: bool,
    pub return_no_rules_tags: bool,
    pub return_excluded_tags: bool,
    pub return_included_tags: bool,
    pub untagged_rule_name: Option<String>,
    pub no_rules_rule_name: Option<String>,
    pub excluded_rule_name: Option<String>,
    /// Prepended to every LAT full name as `"label.lat"`.
    pub label: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            excluded_token_types: TokenTypeSet::default_excluded(),
            allow_overlapping_tags: false,
            return_untagged_tags: true,
            return_no_rules_tags: true,
            return_excluded_tags: true,
            return_included_tags: true,
            untagged_rule_name: Some("untagged".to_string()),
            no_rules_rule_name: Some("no_rules".to_string()),
            excluded_rule_name: Some("excluded".to_string()),
            label: "label".to_string(),
        }
    }
}

impl Config {
    pub fn untagged_rule_name(&self) -> &str {
        self.untagged_rule_name.as_deref().unwrap_or("untagged")
    }

    pub fn no_rules_rule_name(&self) -> &str {
        self.no_rules_rule_name.as_deref().unwrap_or("no_rules")
    }

    pub fn excluded_rule_name(&self) -> &str {
        self.excluded_rule_name.as_deref().unwrap_or("excluded")
    }

    pub fn full_name(&self, lat: &str) -> String {
        format!("{}.{}", self.label, lat)
    }

    /// Whether a given synthesized/looked-up rule name should be kept in the
    /// returned `RuleStat` map, per the four `return_*_tags` switches.
    pub fn should_return_rule(&self, rule_name: &str) -> bool {
        if rule_name == self.untagged_rule_name() {
            self.return_untagged_tags
        } else if rule_name == self.no_rules_rule_name() {
            self.return_no_rules_tags
        } else if rule_name == self.excluded_rule_name() {
            self.return_excluded_tags
        } else {
            self.return_included_tags
        }
    }
}
