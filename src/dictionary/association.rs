use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

use super::schema::LinkDeclaration;

/// A directed, named relation permitted between two entity types
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Association {
    pub src: String,
    pub dst: String,
    pub label: String,
}

impl Association {
    pub fn new(src: impl Into<String>, dst: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.src, self.label, self.dst)
    }
}

/// Associations declared by one link of entity type `src`, inverses included.
///
/// Subgroups are walked to any depth. Declarations naming a relation without
/// its full `name`/`target_type`/`backref` triple are skipped.
pub fn extract_associations(src: &str, link: &LinkDeclaration) -> BTreeSet<Association> {
    let mut associations = BTreeSet::new();
    let mut pending = vec![link];

    while let Some(current) = pending.pop() {
        match current.relation() {
            Some((name, target, backref)) => {
                associations.insert(Association::new(src, target, name));
                associations.insert(Association::new(target, src, backref));
            }
            None if current.name.is_some() => {
                warn!(
                    "Link '{}' on '{src}' is missing target_type or backref; ignoring",
                    current.name.as_deref().unwrap_or_default()
                );
            }
            None => {}
        }
        pending.extend(current.subgroup.iter());
    }

    associations
}
