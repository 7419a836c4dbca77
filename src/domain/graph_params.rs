// Graph size and time range domain models
use std::collections::HashMap;

pub const RELATIVE_RANGE_PARAM: &str = "graph_range";
pub const RANGE_START_PARAM: &str = "graph_start";
pub const RANGE_END_PARAM: &str = "graph_end";

pub const DEFAULT_WIDTH: &str = "300";
pub const DEFAULT_HEIGHT: &str = "150";
pub const DEFAULT_START: &str = "-1hours";

/// Time window in graphite `from`/`until` notation. `end == None` means now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: String,
    pub end: Option<String>,
}

impl TimeRange {
    /// Read the range picker parameters; a relative range wins over absolute ones
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        if let Some(relative) = params.get(RELATIVE_RANGE_PARAM) {
            return Self {
                start: format!("-{}s", relative),
                end: None,
            };
        }

        Self {
            start: params
                .get(RANGE_START_PARAM)
                .cloned()
                .unwrap_or_else(|| DEFAULT_START.to_string()),
            end: params.get(RANGE_END_PARAM).cloned(),
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START.to_string(),
            end: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphParams {
    pub width: String,
    pub height: String,
    pub range: TimeRange,
}

impl GraphParams {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            width: non_empty(params, "width").unwrap_or(DEFAULT_WIDTH).to_string(),
            height: non_empty(params, "height").unwrap_or(DEFAULT_HEIGHT).to_string(),
            range: TimeRange::from_params(params),
        }
    }
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH.to_string(),
            height: DEFAULT_HEIGHT.to_string(),
            range: TimeRange::default(),
        }
    }
}

fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let parsed = GraphParams::from_params(&HashMap::new());
        assert_eq!(parsed.width, "300");
        assert_eq!(parsed.height, "150");
        assert_eq!(parsed.range.start, "-1hours");
        assert_eq!(parsed.range.end, None);
        assert_eq!(parsed, GraphParams::default());
    }

    #[test]
    fn test_empty_size_falls_back_to_defaults() {
        let parsed = GraphParams::from_params(&params(&[("width", ""), ("height", " ")]));
        assert_eq!(parsed.width, "300");
        assert_eq!(parsed.height, "150");
    }

    #[test]
    fn test_explicit_size() {
        let parsed = GraphParams::from_params(&params(&[("width", "640"), ("height", "480")]));
        assert_eq!(parsed.width, "640");
        assert_eq!(parsed.height, "480");
    }

    #[test]
    fn test_relative_range() {
        let range = TimeRange::from_params(&params(&[
            ("graph_range", "86400"),
            ("graph_start", "1700000000"),
        ]));
        assert_eq!(range.start, "-86400s");
        assert_eq!(range.end, None);
    }

    #[test]
    fn test_absolute_range() {
        let range = TimeRange::from_params(&params(&[
            ("graph_start", "1700000000"),
            ("graph_end", "1700003600"),
        ]));
        assert_eq!(range.start, "1700000000");
        assert_eq!(range.end.as_deref(), Some("1700003600"));
    }

    #[test]
    fn test_absolute_end_only() {
        let range = TimeRange::from_params(&params(&[("graph_end", "1700003600")]));
        assert_eq!(range.start, "-1hours");
        assert_eq!(range.end.as_deref(), Some("1700003600"));
    }
}
