// Monitored object domain model
use serde::Deserialize;

/// A host or service as reported by the monitoring backend.
///
/// `object_type` is kept as a raw string so that kinds this service cannot
/// graph are still representable and can be rejected explicitly.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MonitoredObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub name: String,
    #[serde(default, rename = "host")]
    pub host_name: Option<String>,
}

impl MonitoredObject {
    pub fn host(name: impl Into<String>) -> Self {
        Self {
            object_type: "host".to_string(),
            name: name.into(),
            host_name: None,
        }
    }

    pub fn service(host_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            object_type: "service".to_string(),
            name: name.into(),
            host_name: Some(host_name.into()),
        }
    }
}
