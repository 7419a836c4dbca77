// Graphs widget - Use case for rendering the graphs of a host or service
use crate::application::error::GraphsError;
use crate::application::graphite_query::{GraphiteQuery, GraphiteWeb};
use crate::application::template_store::TemplateStore;
use crate::domain::graph_params::GraphParams;
use crate::domain::graph_template::{GraphTemplate, HOST_BASE_PATTERN};
use crate::domain::monitored_object::MonitoredObject;
use futures::future::try_join_all;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::collections::HashMap;

const HOST_VARIABLE: &str = "hostname";
const SERVICE_VARIABLE: &str = "service";

/// What the graphs are drawn for; decides query narrowing and template applicability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphTarget {
    Host { host: String },
    Service { host: String, service: String },
}

impl GraphTarget {
    /// Restrict the query to the metrics of this host or service
    pub fn filter_query<'a>(&self, query: GraphiteQuery<'a>) -> GraphiteQuery<'a> {
        match self {
            Self::Host { host } => query.where_eq(HOST_VARIABLE, host),
            Self::Service { host, service } => query
                .where_eq(HOST_VARIABLE, host)
                .where_eq(SERVICE_VARIABLE, service),
        }
    }

    /// Service templates are recognised by a `$service` variable in their filter
    pub fn include_template(&self, template: &GraphTemplate) -> bool {
        match self {
            Self::Host { .. } => !template.has_filter_for(SERVICE_VARIABLE),
            Self::Service { .. } => template.has_filter_for(SERVICE_VARIABLE),
        }
    }
}

/// Request-scoped graphs widget.
///
/// Populate it once with [`Graphs::handle_request`], then turn it into HTML
/// with [`Graphs::render`].
#[derive(Debug, Clone)]
pub struct Graphs {
    target: GraphTarget,
    params: GraphParams,
    compact: bool,
    templates: Vec<(String, GraphTemplate)>,
    images: Vec<(String, Vec<(String, String)>)>,
}

impl Graphs {
    pub fn new(target: GraphTarget) -> Self {
        Self {
            target,
            params: GraphParams::default(),
            compact: false,
            templates: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn for_object(object: &MonitoredObject) -> Result<Self, GraphsError> {
        let target = match object.object_type.as_str() {
            "host" => GraphTarget::Host {
                host: object.name.clone(),
            },
            "service" => {
                let host = object.host_name.clone().ok_or_else(|| {
                    GraphsError::InvalidObject(format!("service {} has no host", object.name))
                })?;
                GraphTarget::Service {
                    host,
                    service: object.name.clone(),
                }
            }
            other => return Err(GraphsError::UnsupportedEntityKind(other.to_string())),
        };

        Ok(Self::new(target))
    }

    pub fn target(&self) -> &GraphTarget {
        &self.target
    }

    pub fn params(&self) -> &GraphParams {
        &self.params
    }

    pub fn compact(&self) -> bool {
        self.compact
    }

    pub fn set_compact(&mut self, compact: bool) -> &mut Self {
        self.compact = compact;
        self
    }

    pub fn templates(&self) -> impl Iterator<Item = &GraphTemplate> {
        self.templates.iter().map(|(_, template)| template)
    }

    #[cfg(test)]
    pub fn images(&self, template_name: &str) -> Option<&[(String, String)]> {
        self.images
            .iter()
            .find(|(name, _)| name == template_name)
            .map(|(_, links)| links.as_slice())
    }

    pub async fn handle_request(
        &mut self,
        params: &HashMap<String, String>,
        store: &dyn TemplateStore,
        graphite: &GraphiteWeb,
    ) -> Result<&mut Self, GraphsError> {
        self.params = GraphParams::from_params(params);
        self.collect_templates(store).await?;
        self.collect_images(graphite).await?;
        Ok(self)
    }

    async fn collect_templates(&mut self, store: &dyn TemplateStore) -> Result<(), GraphsError> {
        self.templates.clear();

        for set in store.load_template_sets().await? {
            if !set.has_base_pattern(HOST_BASE_PATTERN) {
                tracing::debug!("Skipping template set {} without host pattern", set.name);
                continue;
            }

            for template in set.templates {
                if !self.target.include_template(&template) {
                    continue;
                }

                match self
                    .templates
                    .iter_mut()
                    .find(|(name, _)| *name == template.name)
                {
                    Some(entry) => entry.1 = template,
                    None => self.templates.push((template.name.clone(), template)),
                }
            }
        }

        tracing::debug!("Collected {} templates for {:?}", self.templates.len(), self.target);
        Ok(())
    }

    async fn collect_images(&mut self, graphite: &GraphiteWeb) -> Result<(), GraphsError> {
        let mut fetches = Vec::with_capacity(self.templates.len());
        for (name, template) in &self.templates {
            let params = self.render_params(name);
            let query = self
                .target
                .filter_query(graphite.select().from(template.filter_string()));
            fetches.push(async move {
                let links = query.image_links(template, &params).await?;
                Ok::<_, GraphsError>((name.clone(), links))
            });
        }

        let images = try_join_all(fetches).await?;
        self.images = images;
        Ok(())
    }

    fn render_params(&self, template_name: &str) -> Vec<(String, String)> {
        let mut params = vec![
            ("template".to_string(), template_name.to_string()),
            ("from".to_string(), self.params.range.start.clone()),
        ];
        if let Some(end) = &self.params.range.end {
            params.push(("until".to_string(), end.clone()));
        }
        params.push(("width".to_string(), self.params.width.clone()));
        params.push(("height".to_string(), self.params.height.clone()));
        params
    }

    pub fn render(&self) -> String {
        let mut rendered = String::new();

        for (name, images) in &self.images {
            if images.is_empty() {
                continue;
            }

            rendered.push_str("<div class=\"images\">");

            if !self.compact {
                rendered.push_str(&format!("<h3>{}</h3>", encode_text(&capitalize(name))));
                if let Some(template) = self.templates().find(|t| t.name == *name) {
                    rendered.push_str(&render_legend(template));
                }
            }

            for (_title, url) in images {
                rendered.push_str(&format!(
                    "<img src=\"{}\" class=\"graphiteImg\" alt=\"\" width=\"{}\" height=\"{}\" />",
                    encode_double_quoted_attribute(url),
                    encode_double_quoted_attribute(&self.params.width),
                    encode_double_quoted_attribute(&self.params.height)
                ));
            }

            rendered.push_str("</div>");
        }

        if rendered.is_empty() {
            "<p>No graphs found</p>".to_string()
        } else {
            rendered
        }
    }
}

fn render_legend(template: &GraphTemplate) -> String {
    match &template.description {
        Some(description) => format!("<p class=\"graph-legend\">{}</p>", encode_text(description)),
        None => String::new(),
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
