//! Named entities returned by the entity-detection service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One detected entity: a text span and its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: String,
}

impl Entity {
    pub fn new(text: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entity_type: entity_type.into(),
        }
    }
}

/// Fold an entity list into a type-keyed mapping for the search document.
///
/// Types are lower-cased; texts of the same type are space-joined in
/// encounter order.
pub fn fold_entities(entities: &[Entity]) -> BTreeMap<String, String> {
    let mut folded: BTreeMap<String, String> = BTreeMap::new();
    for entity in entities {
        let key = entity.entity_type.to_lowercase();
        match folded.get_mut(&key) {
            Some(joined) => {
                joined.push(' ');
                joined.push_str(&entity.text);
            }
            None => {
                folded.insert(key, entity.text.clone());
            }
        }
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_same_type_space_joined() {
        let entities = vec![Entity::new("Acme", "ORG"), Entity::new("Corp", "ORG")];
        let folded = fold_entities(&entities);
        assert_eq!(folded.get("org").map(String::as_str), Some("Acme Corp"));
    }

    #[test]
    fn test_fold_mixed_types() {
        let entities = vec![
            Entity::new("Acme", "ORG"),
            Entity::new("2024-01-01", "DATE"),
            Entity::new("Corp", "ORG"),
        ];
        let folded = fold_entities(&entities);
        assert_eq!(folded.len(), 2);
        assert_eq!(folded["org"], "Acme Corp");
        assert_eq!(folded["date"], "2024-01-01");
    }

    #[test]
    fn test_fold_empty() {
        assert!(fold_entities(&[]).is_empty());
    }
}
