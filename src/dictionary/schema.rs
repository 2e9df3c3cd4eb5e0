use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Domain tag of an entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Administrative,
    Analysis,
    Biospecimen,
    Clinical,
    Data,
    DataBundle,
    DataFile,
    IndexFile,
    MetadataFile,
    Notation,
    QcBundle,
    #[serde(rename = "TBD")]
    Tbd,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

/// One declared relation from an entity type to a target type.
///
/// A declaration with a `subgroup` groups alternative relations (usually an
/// exclusive choice); the group itself may or may not name a relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkDeclaration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<Multiplicity>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub exclusive: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subgroup: Vec<LinkDeclaration>,
}

impl LinkDeclaration {
    /// The `(name, target_type, backref)` triple, when all three are declared
    pub fn relation(&self) -> Option<(&str, &str, &str)> {
        match (&self.name, &self.target_type, &self.backref) {
            (Some(name), Some(target), Some(backref)) => {
                Some((name.as_str(), target.as_str(), backref.as_str()))
            }
            _ => None,
        }
    }
}

/// Fully resolved schema of one entity type. Contains no `$ref` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub submittable: bool,
    #[serde(default)]
    pub downloadable: bool,
    #[serde(default, rename = "previous_version_downloadable")]
    pub previous_version_downloadable: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub links: Vec<LinkDeclaration>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub system_properties: Vec<String>,
    #[serde(default)]
    pub tag_properties: Vec<String>,
    #[serde(default)]
    pub unique_keys: Vec<Vec<String>>,
}

impl EntitySchema {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
