use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;
use tracing::debug;

use super::association::{Association, extract_associations};
use super::schema::EntitySchema;

/// A loaded data dictionary: the resolved schema of every entity type for
/// one dictionary version.
///
/// Identity is `name` + `version`; schema content does not take part in
/// equality or hashing. The association set is derived on first use and
/// kept for the lifetime of the instance.
#[derive(Debug)]
pub struct Dictionary {
    name: String,
    version: String,
    url: Option<String>,
    schema: BTreeMap<String, EntitySchema>,
    associations: OnceLock<BTreeSet<Association>>,
}

impl Dictionary {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        schema: BTreeMap<String, EntitySchema>,
        url: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            url,
            schema,
            associations: OnceLock::new(),
        }
    }

    /// Build a dictionary from already resolved entity schemas, keyed by their ids
    pub fn from_schemas(
        name: impl Into<String>,
        version: impl Into<String>,
        schemas: impl IntoIterator<Item = EntitySchema>,
    ) -> Self {
        let schema = schemas
            .into_iter()
            .map(|entity| (entity.id.clone(), entity))
            .collect();
        Self::new(name, version, schema, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn schema(&self) -> &BTreeMap<String, EntitySchema> {
        &self.schema
    }

    pub fn entity(&self, label: &str) -> Option<&EntitySchema> {
        self.schema.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.schema.keys().map(String::as_str)
    }

    /// Every association declared anywhere in the dictionary, inverses included
    pub fn all_associations(&self) -> &BTreeSet<Association> {
        self.associations.get_or_init(|| {
            debug!(
                "Deriving associations for dictionary {} {}",
                self.name, self.version
            );
            let mut associations = BTreeSet::new();
            for (label, entity) in &self.schema {
                for link in &entity.links {
                    associations.extend(extract_associations(label, link));
                }
            }
            associations
        })
    }

    /// Associations whose source is `label`
    pub fn associations(&self, label: &str) -> BTreeSet<&Association> {
        self.all_associations()
            .iter()
            .filter(|association| association.src == label)
            .collect()
    }

    /// Every relation name appearing in the association set
    pub fn links(&self) -> BTreeSet<&str> {
        self.all_associations()
            .iter()
            .map(|association| association.label.as_str())
            .collect()
    }
}

impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version
    }
}

impl Eq for Dictionary {}

impl Hash for Dictionary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
    }
}
