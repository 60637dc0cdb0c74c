//! Wire model for the document-analysis service's paginated results.
//!
//! Field names follow the service's PascalCase JSON so recorded payloads and
//! fixtures deserialize unchanged. Unknown block and relationship types are
//! tolerated so forward-compatible payloads still parse.

use serde::{Deserialize, Serialize};

/// Geometry-free block kinds this pipeline interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    KeyValueSet,
    Table,
    Cell,
    SelectionElement,
    #[serde(other)]
    Other,
}

/// Link kinds between blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Child,
    Value,
    #[serde(other)]
    Other,
}

/// Ordered link from one block to a set of related block ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "Type")]
    pub relationship_type: RelationshipType,
    #[serde(rename = "Ids", default)]
    pub ids: Vec<String>,
}

/// Checkbox / radio state of a selection element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    Selected,
    NotSelected,
}

impl SelectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Selected => "SELECTED",
            Self::NotSelected => "NOT_SELECTED",
        }
    }
}

/// One analysis block. Only the fields the extractor reads are modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    pub block_type: BlockType,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `KEY` / `VALUE` tags on key-value-set blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<SelectionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl Block {
    /// Ids of `CHILD` relationships, in relationship order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|r| r.relationship_type == RelationshipType::Child)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    /// Ids of `VALUE` relationships (key block -> value block).
    pub fn value_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|r| r.relationship_type == RelationshipType::Value)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    pub fn is_key(&self) -> bool {
        self.block_type == BlockType::KeyValueSet
            && self.entity_types.iter().any(|t| t == "KEY")
    }
}

/// Document-level metadata reported with results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
}

/// One page of the paginated result set.
///
/// A present `NextToken` means more batches remain; the assembled full
/// response carries `next_token: None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultsPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<DocumentMetadata>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        let json = r#"{
            "DocumentMetadata": {"Pages": 2},
            "Blocks": [
                {"BlockType": "PAGE", "Id": "p1",
                 "Relationships": [{"Type": "CHILD", "Ids": ["l1"]}]},
                {"BlockType": "LINE", "Id": "l1", "Text": "hello", "Page": 1}
            ],
            "NextToken": "abc"
        }"#;
        let page: ResultsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.blocks.len(), 2);
        assert_eq!(page.next_token.as_deref(), Some("abc"));
        assert_eq!(page.blocks[0].block_type, BlockType::Page);
        assert_eq!(page.blocks[0].child_ids().collect::<Vec<_>>(), vec!["l1"]);
        assert_eq!(page.blocks[1].text.as_deref(), Some("hello"));
    }

    #[test]
    fn test_unknown_block_type_tolerated() {
        let json = r#"{"BlockType": "MERGED_CELL", "Id": "x"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.block_type, BlockType::Other);
    }

    #[test]
    fn test_key_detection() {
        let json = r#"{
            "BlockType": "KEY_VALUE_SET", "Id": "k1", "EntityTypes": ["KEY"],
            "Relationships": [
                {"Type": "VALUE", "Ids": ["v1"]},
                {"Type": "CHILD", "Ids": ["w1"]}
            ]
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert!(block.is_key());
        assert_eq!(block.value_ids().collect::<Vec<_>>(), vec!["v1"]);
    }
}
