//! Partial updates to node data.

use mindmap_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::node::{NodeData, NodeShape, NodeSize};

/// What to do with keys a patch does not recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Fail the whole patch with [`Error::UnknownField`].
    #[default]
    Reject,
    /// Drop the key and apply the rest.
    Ignore,
}

/// A partial [`NodeData`]; `None` fields are left untouched on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDataPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<NodeShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<NodeSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl NodeDataPatch {
    /// Patch that only relabels.
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Patch that only attaches an image.
    pub fn image(data_uri: impl Into<String>) -> Self {
        Self {
            image: Some(data_uri.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_shape(mut self, shape: NodeShape) -> Self {
        self.shape = Some(shape);
        self
    }

    #[must_use]
    pub const fn with_size(mut self, size: NodeSize) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    /// True when applying this patch would change nothing.
    pub const fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.shape.is_none()
            && self.background_color.is_none()
            && self.text_color.is_none()
            && self.size.is_none()
            && self.image.is_none()
    }

    /// Returns `data` with every set field of this patch merged in.
    pub fn apply(&self, data: &NodeData) -> NodeData {
        NodeData {
            label: self.label.clone().unwrap_or_else(|| data.label.clone()),
            shape: self.shape.unwrap_or(data.shape),
            background_color: self
                .background_color
                .clone()
                .unwrap_or_else(|| data.background_color.clone()),
            text_color: self
                .text_color
                .clone()
                .unwrap_or_else(|| data.text_color.clone()),
            size: self.size.unwrap_or(data.size),
            image: self.image.clone().or_else(|| data.image.clone()),
        }
    }

    /// Builds a patch from a JSON object using camelCase field names.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not an object, a known field has the
    /// wrong type, or an unknown field is present under
    /// [`UnknownFieldPolicy::Reject`].
    pub fn from_json(value: &Value, policy: UnknownFieldPolicy) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::invalid_record("node data patch must be a JSON object"))?;

        let mut patch = Self::default();
        for (key, field) in object {
            match key.as_str() {
                "label" => patch.label = Some(field_value(key, field)?),
                "shape" => patch.shape = Some(field_value(key, field)?),
                "backgroundColor" => patch.background_color = Some(field_value(key, field)?),
                "textColor" => patch.text_color = Some(field_value(key, field)?),
                "size" => patch.size = Some(field_value(key, field)?),
                "image" => patch.image = Some(field_value(key, field)?),
                unknown => match policy {
                    UnknownFieldPolicy::Reject => return Err(Error::unknown_field(unknown)),
                    UnknownFieldPolicy::Ignore => {
                        debug!(field = unknown, "Ignoring unknown node data field");
                    }
                },
            }
        }
        Ok(patch)
    }
}

fn field_value<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|e| Error::invalid_field(key, e.to_string()))
}
