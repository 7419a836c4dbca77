// Graphite query builder - turns a template filter into render image links
use crate::application::error::GraphsError;
use crate::application::graphite_client::GraphiteClient;
use crate::domain::graph_template::{GraphTemplate, PatternToken, substitute, tokenize};
use std::collections::HashMap;
use std::sync::Arc;

const GLOB_CHARS: &[char] = &['*', '?', '[', '{'];

/// Entry point for graphite queries; owns the backend client and the render base URL
#[derive(Clone)]
pub struct GraphiteWeb {
    client: Arc<dyn GraphiteClient>,
    render_url: String,
}

impl GraphiteWeb {
    pub fn new(client: Arc<dyn GraphiteClient>, render_url: impl Into<String>) -> Self {
        Self {
            client,
            render_url: render_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn select(&self) -> GraphiteQuery<'_> {
        GraphiteQuery {
            web: self,
            pattern: String::new(),
            filters: HashMap::new(),
        }
    }
}

pub struct GraphiteQuery<'a> {
    web: &'a GraphiteWeb,
    pattern: String,
    filters: HashMap<String, String>,
}

impl<'a> GraphiteQuery<'a> {
    pub fn from(mut self, filter: &str) -> Self {
        self.pattern = filter.to_string();
        self
    }

    /// Bind `$variable` to a fixed value
    pub fn where_eq(mut self, variable: &str, value: &str) -> Self {
        self.filters.insert(variable.to_string(), escape_metric(value));
        self
    }

    /// The glob sent to graphite: bound variables substituted, the rest wildcarded
    pub fn search_pattern(&self) -> String {
        substitute(&self.pattern, |name| {
            Some(
                self.filters
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| "*".to_string()),
            )
        })
    }

    /// Resolve matching metrics into `(title, render url)` pairs.
    ///
    /// Titles are unique; a later metric with the same title replaces the URL
    /// of the earlier one.
    pub async fn image_links(
        &self,
        template: &GraphTemplate,
        params: &[(String, String)],
    ) -> Result<Vec<(String, String)>, GraphsError> {
        let search = self.search_pattern();
        let paths = self.web.client.expand(&search).await?;
        tracing::debug!(
            "Template {} matched {} metrics for {}",
            template.name,
            paths.len(),
            search
        );

        let mut links: Vec<(String, String)> = Vec::new();
        for path in paths {
            let Some(vars) = self.extract_variables(&path) else {
                tracing::warn!("Skipping metric {} not matching {}", path, self.pattern);
                continue;
            };

            let title = match &template.title {
                Some(title) => substitute(title, |name| vars.get(name).cloned()),
                None => path.clone(),
            };
            let url = self.render_link(template, &path, &vars, params);

            match links.iter_mut().find(|(existing, _)| *existing == title) {
                Some(entry) => entry.1 = url,
                None => links.push((title, url)),
            }
        }

        Ok(links)
    }

    /// Map whole-segment variables of the pattern onto the segments of `path`
    fn extract_variables(&self, path: &str) -> Option<HashMap<&str, String>> {
        let pattern_segments: Vec<&str> = self.pattern.split('.').collect();
        let path_segments: Vec<&str> = path.split('.').collect();
        if pattern_segments.len() != path_segments.len() {
            return None;
        }

        let mut vars = HashMap::new();
        for (pattern, value) in pattern_segments.into_iter().zip(path_segments) {
            let tokens = tokenize(pattern);
            match tokens.as_slice() {
                [PatternToken::Variable(name)] => {
                    if self.filters.get(*name).is_some_and(|bound| bound != value) {
                        return None;
                    }
                    vars.insert(*name, value.to_string());
                }
                [PatternToken::Literal(text)] if !text.contains(GLOB_CHARS) => {
                    if *text != value {
                        return None;
                    }
                }
                _ => {}
            }
        }

        Some(vars)
    }

    fn render_link(
        &self,
        template: &GraphTemplate,
        path: &str,
        vars: &HashMap<&str, String>,
        params: &[(String, String)],
    ) -> String {
        let target = match &template.target {
            Some(expression) => substitute(expression, |name| {
                if name == "metric_path" {
                    Some(path.to_string())
                } else {
                    vars.get(name).cloned()
                }
            }),
            None => path.to_string(),
        };

        let mut query = vec![format!("target={}", urlencoding::encode(&target))];
        for (key, value) in params {
            query.push(format!("{}={}", key, urlencoding::encode(value)));
        }
        for (key, value) in &template.url_params {
            if params.iter().any(|(existing, _)| existing == key) {
                continue;
            }
            query.push(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            ));
        }

        format!("{}/render?{}", self.web.render_url, query.join("&"))
    }
}

/// Escape a value the way Icinga 2's graphite writer builds metric path components
pub fn escape_metric(value: &str) -> String {
    value.replace(['.', ' ', '\\', '/'], "_")
}
