// Graph template domain models
use serde::Deserialize;
use std::collections::BTreeMap;

/// Base pattern key a template set must define to be used for graphs
pub const HOST_BASE_PATTERN: &str = "icingaHost";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GraphTemplate {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub filter: String,
    /// Graphite function expression; `$metric_path` is replaced by each matched path
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub url_params: BTreeMap<String, String>,
}

impl GraphTemplate {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            filter: filter.into(),
            target: None,
            url_params: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn filter_string(&self) -> &str {
        &self.filter
    }

    /// Whether the filter references `$variable` as a whole token
    pub fn has_filter_for(&self, variable: &str) -> bool {
        variables(&self.filter).any(|name| name == variable)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TemplateSet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_patterns: BTreeMap<String, String>,
    #[serde(default)]
    pub templates: Vec<GraphTemplate>,
}

impl TemplateSet {
    pub fn has_base_pattern(&self, key: &str) -> bool {
        self.base_patterns.contains_key(key)
    }
}

/// A piece of a metric pattern: literal text or a `$name` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternToken<'a> {
    Literal(&'a str),
    Variable(&'a str),
}

/// Split a pattern into literals and `$name` variables.
///
/// Variable names are the longest run of ASCII alphanumerics and underscores
/// after a `$`. A lone `$` stays literal.
pub fn tokenize(pattern: &str) -> Vec<PatternToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = pattern;

    while let Some(pos) = rest.find('$') {
        let after = &rest[pos + 1..];
        let len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());

        if len == 0 {
            tokens.push(PatternToken::Literal(&rest[..pos + 1]));
            rest = after;
            continue;
        }

        if pos > 0 {
            tokens.push(PatternToken::Literal(&rest[..pos]));
        }
        tokens.push(PatternToken::Variable(&after[..len]));
        rest = &after[len..];
    }

    if !rest.is_empty() {
        tokens.push(PatternToken::Literal(rest));
    }

    tokens
}

pub fn variables(pattern: &str) -> impl Iterator<Item = &str> {
    tokenize(pattern).into_iter().filter_map(|token| match token {
        PatternToken::Variable(name) => Some(name),
        PatternToken::Literal(_) => None,
    })
}

/// Replace every `$name` with `resolve(name)`, leaving unresolved ones as-is
pub fn substitute<'a, F>(pattern: &'a str, mut resolve: F) -> String
where
    F: FnMut(&'a str) -> Option<String>,
{
    let mut result = String::with_capacity(pattern.len());
    for token in tokenize(pattern) {
        match token {
            PatternToken::Literal(text) => result.push_str(text),
            PatternToken::Variable(name) => match resolve(name) {
                Some(value) => result.push_str(&value),
                None => {
                    result.push('$');
                    result.push_str(name);
                }
            },
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("icinga2.$hostname.services.$service.perfdata");
        assert_eq!(
            tokens,
            vec![
                PatternToken::Literal("icinga2."),
                PatternToken::Variable("hostname"),
                PatternToken::Literal(".services."),
                PatternToken::Variable("service"),
                PatternToken::Literal(".perfdata"),
            ]
        );
    }

    #[test]
    fn test_tokenize_lone_dollar() {
        assert_eq!(
            tokenize("a$.b"),
            vec![PatternToken::Literal("a$"), PatternToken::Literal(".b")]
        );
    }

    #[test]
    fn test_has_filter_for_matches_whole_token() {
        let template = GraphTemplate::new(
            "ping",
            "icinga2.$hostname.services.$service_check_command.perfdata.rta.value",
        );
        assert!(template.has_filter_for("hostname"));
        assert!(!template.has_filter_for("service"));
        assert!(template.has_filter_for("service_check_command"));
    }

    #[test]
    fn test_substitute_keeps_unresolved() {
        let result = substitute("$a.$b.c", |name| (name == "a").then(|| "x".to_string()));
        assert_eq!(result, "x.$b.c");
    }

    #[test]
    fn test_template_set_from_toml() {
        let set: TemplateSet = toml::from_str(
            r#"
            name = "icinga2"

            [base_patterns]
            icingaHost = "icinga2.$hostname.host.$host_check_command"

            [[templates]]
            name = "hostalive"
            title = "Round trip time"
            filter = "icinga2.$hostname.host.hostalive.perfdata.rta.value"

            [templates.url_params]
            areaMode = "all"
            "#,
        )
        .unwrap();

        assert!(set.has_base_pattern(HOST_BASE_PATTERN));
        assert_eq!(set.templates.len(), 1);
        assert_eq!(set.templates[0].title.as_deref(), Some("Round trip time"));
        assert_eq!(set.templates[0].url_params.get("areaMode").map(String::as_str), Some("all"));
    }
}
