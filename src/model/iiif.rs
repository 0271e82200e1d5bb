//! IIIF manifest and annotation-list types.
//!
//! Only the fields the indexer follows are modelled. Both the Presentation
//! 2 (`@id`) and Presentation 3 (`id`) spellings of identifiers are accepted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A IIIF manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest URI
    #[serde(alias = "@id")]
    pub id: String,

    /// Link to the annotation list describing the object's files
    #[serde(rename = "seeAlso", deserialize_with = "first_of_one_or_many")]
    pub see_also: SeeAlso,
}

impl Manifest {
    /// Decode a manifest from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// The `seeAlso` reference of a manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeeAlso {
    /// Annotation list URI
    #[serde(alias = "@id")]
    pub id: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

fn first_of_one_or_many<'de, D>(deserializer: D) -> std::result::Result<SeeAlso, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match OneOrMany::<SeeAlso>::deserialize(deserializer)? {
        OneOrMany::One(item) => Ok(item),
        OneOrMany::Many(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| serde::de::Error::custom("seeAlso is empty")),
    }
}

/// A IIIF annotation list of linked resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationList {
    /// Linked resources
    #[serde(default)]
    pub resources: Vec<ResourceAnnotation>,
}

impl AnnotationList {
    /// Decode an annotation list from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// One annotation of the list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceAnnotation {
    /// The annotated resource
    pub resource: Resource,
}

/// A retrievable resource with a human-readable label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    /// Retrievable URI
    #[serde(alias = "@id")]
    pub id: String,

    /// File name, e.g. `mets.xml`
    #[serde(default)]
    pub label: String,
}

/// Lookup from resource label to resource URI.
#[derive(Debug, Clone, Default)]
pub struct AnnotationMap {
    entries: HashMap<String, String>,
}

impl AnnotationMap {
    /// Build the lookup from annotation-list resources.
    ///
    /// When a label occurs more than once the last resource wins.
    pub fn from_resources(resources: &[ResourceAnnotation]) -> Self {
        let mut entries = HashMap::with_capacity(resources.len());
        for annotation in resources {
            let resource = &annotation.resource;
            if let Some(previous) = entries.insert(resource.label.clone(), resource.id.clone()) {
                log::warn!(
                    "Duplicate annotation label {:?}: {} replaced by {}",
                    resource.label,
                    previous,
                    resource.id
                );
            }
        }
        Self { entries }
    }

    /// Get the URI for a label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    /// Get the URI for a label, failing when it is absent.
    pub fn require(&self, label: &str) -> Result<&str> {
        self.get(label)
            .ok_or_else(|| Error::MissingAnnotation(label.to_string()))
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the lookup is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&AnnotationList> for AnnotationMap {
    fn from(list: &AnnotationList) -> Self {
        Self::from_resources(&list.resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_v3() {
        let json = r#"{"id": "https://host/iiif/abc/manifest",
                       "seeAlso": {"id": "https://host/iiif/abc/annotations", "format": "x"}}"#;
        let manifest = Manifest::from_slice(json.as_bytes()).unwrap();
        assert_eq!(manifest.id, "https://host/iiif/abc/manifest");
        assert_eq!(manifest.see_also.id, "https://host/iiif/abc/annotations");
    }

    #[test]
    fn test_manifest_v2_array_see_also() {
        let json = r#"{"@id": "m", "seeAlso": [{"@id": "a1"}, {"@id": "a2"}]}"#;
        let manifest = Manifest::from_slice(json.as_bytes()).unwrap();
        assert_eq!(manifest.id, "m");
        assert_eq!(manifest.see_also.id, "a1");
    }

    #[test]
    fn test_manifest_missing_see_also() {
        let result = Manifest::from_slice(br#"{"id": "m"}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_annotation_map_last_wins() {
        let json = r#"{"resources": [
            {"resource": {"@id": "u1", "label": "mets.xml"}},
            {"resource": {"@id": "u2", "label": "page1.xml"}},
            {"resource": {"@id": "u3", "label": "mets.xml"}}
        ]}"#;
        let list = AnnotationList::from_slice(json.as_bytes()).unwrap();
        let map = AnnotationMap::from(&list);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("mets.xml"), Some("u3"));
        assert_eq!(map.get("page1.xml"), Some("u2"));
    }

    #[test]
    fn test_annotation_map_require() {
        let map = AnnotationMap::default();
        assert!(map.is_empty());
        let err = map.require("mets.xml").unwrap_err();
        assert!(matches!(err, Error::MissingAnnotation(ref l) if l == "mets.xml"));
    }
}
