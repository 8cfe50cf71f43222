use serde::{Deserialize, Serialize};

use crate::annotate::AnnotationSet;

/// Metadata attached to a shared comparison.
///
/// This is the contract the serialized annotations must satisfy at the
/// persistence boundary; uploading the blobs and minting share identifiers
/// is the hosting application's job.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "AnnotationSet::is_empty")]
    pub annotations: AnnotationSet,
    #[serde(default)]
    pub view_mode: Option<String>,
    #[serde(default)]
    pub is_single: bool,
    #[serde(default)]
    pub parent_id: Option<String>,
}
