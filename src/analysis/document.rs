//! Reconstruction of a logical document from a flat block list.
//!
//! The analysis service returns a flat, ordered list of blocks linked by id
//! relationships. Reconstruction walks `PAGE` blocks in list order and each
//! page's `CHILD` ids in relationship order, so the block list must be the
//! full concatenation of every paginated fetch, in fetch order. Reordering
//! blocks breaks form and table reconstruction.

use std::collections::{BTreeMap, HashMap};

use super::blocks::{Block, BlockType};

/// One key/value pair detected on a page, in detection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: String,
    /// `None` when the key has no linked value or the value is empty.
    pub value: Option<String>,
}

/// One detected table: ordered rows of ordered cell texts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalyzedTable {
    pub rows: Vec<Vec<String>>,
}

/// One page of the assembled document.
#[derive(Debug, Clone)]
pub struct AnalyzedPage {
    /// 1-based page number.
    pub page_number: u32,
    /// Line texts in reading order.
    pub lines: Vec<String>,
    /// Form fields in detection order.
    pub fields: Vec<FormField>,
    /// Tables in detection order.
    pub tables: Vec<AnalyzedTable>,
}

/// The assembled analysis result for one document.
#[derive(Debug, Clone, Default)]
pub struct AnalyzedDocument {
    pub pages: Vec<AnalyzedPage>,
}

impl AnalyzedDocument {
    /// Build the page/line/form/table structure from the full block list.
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let index: HashMap<&str, &Block> =
            blocks.iter().map(|b| (b.id.as_str(), b)).collect();

        let mut pages = Vec::new();
        for block in blocks.iter().filter(|b| b.block_type == BlockType::Page) {
            let page_number = block.page.unwrap_or(pages.len() as u32 + 1);
            let mut page = AnalyzedPage {
                page_number,
                lines: Vec::new(),
                fields: Vec::new(),
                tables: Vec::new(),
            };

            for child_id in block.child_ids() {
                let Some(child) = index.get(child_id) else {
                    continue;
                };
                match child.block_type {
                    BlockType::Line => {
                        let text = match &child.text {
                            Some(text) => text.clone(),
                            None => words_text(child, &index),
                        };
                        page.lines.push(text);
                    }
                    BlockType::KeyValueSet if child.is_key() => {
                        page.fields.push(build_field(child, &index));
                    }
                    BlockType::Table => {
                        page.tables.push(build_table(child, &index));
                    }
                    _ => {}
                }
            }

            pages.push(page);
        }

        Self { pages }
    }
}

/// Resolve a key block into a form field via its `VALUE` relationship.
fn build_field(key_block: &Block, index: &HashMap<&str, &Block>) -> FormField {
    let key = words_text(key_block, index);
    let value = key_block
        .value_ids()
        .next()
        .and_then(|id| index.get(id))
        .map(|value_block| words_text(value_block, index))
        .filter(|text| !text.is_empty());
    FormField { key, value }
}

/// Resolve a table block into a row/column grid of cell texts.
///
/// Cells carry explicit 1-based row and column indices; grouping by index
/// rather than list position keeps cells split across result batches in
/// their detected positions.
fn build_table(table_block: &Block, index: &HashMap<&str, &Block>) -> AnalyzedTable {
    let mut grid: BTreeMap<u32, BTreeMap<u32, String>> = BTreeMap::new();
    for cell_id in table_block.child_ids() {
        let Some(cell) = index.get(cell_id) else {
            continue;
        };
        if cell.block_type != BlockType::Cell {
            continue;
        }
        let row = cell.row_index.unwrap_or(0);
        let column = cell.column_index.unwrap_or(0);
        grid.entry(row)
            .or_default()
            .insert(column, words_text(cell, index));
    }

    AnalyzedTable {
        rows: grid
            .into_values()
            .map(|row| row.into_values().collect())
            .collect(),
    }
}

/// Space-join the texts of a block's word and selection children.
fn words_text(block: &Block, index: &HashMap<&str, &Block>) -> String {
    let mut parts = Vec::new();
    for child_id in block.child_ids() {
        let Some(child) = index.get(child_id) else {
            continue;
        };
        match child.block_type {
            BlockType::Word => {
                if let Some(text) = &child.text {
                    parts.push(text.as_str());
                }
            }
            BlockType::SelectionElement => {
                if let Some(status) = child.selection_status {
                    parts.push(status.as_str());
                }
            }
            _ => {}
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::blocks::{Relationship, RelationshipType, SelectionStatus};

    fn block(block_type: BlockType, id: &str) -> Block {
        Block {
            block_type,
            id: id.to_string(),
            text: None,
            entity_types: Vec::new(),
            relationships: Vec::new(),
            row_index: None,
            column_index: None,
            selection_status: None,
            page: None,
        }
    }

    fn word(id: &str, text: &str) -> Block {
        let mut b = block(BlockType::Word, id);
        b.text = Some(text.to_string());
        b
    }

    fn children(ids: &[&str]) -> Relationship {
        Relationship {
            relationship_type: RelationshipType::Child,
            ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_lines_in_order() {
        let mut page = block(BlockType::Page, "p1");
        page.relationships.push(children(&["l1", "l2"]));
        let mut l1 = block(BlockType::Line, "l1");
        l1.text = Some("first line".to_string());
        let mut l2 = block(BlockType::Line, "l2");
        l2.text = Some("second line".to_string());

        let doc = AnalyzedDocument::from_blocks(&[page, l1, l2]);
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].page_number, 1);
        assert_eq!(doc.pages[0].lines, vec!["first line", "second line"]);
    }

    #[test]
    fn test_form_field_with_value() {
        let mut page = block(BlockType::Page, "p1");
        page.relationships.push(children(&["k1"]));

        let mut key = block(BlockType::KeyValueSet, "k1");
        key.entity_types.push("KEY".to_string());
        key.relationships.push(Relationship {
            relationship_type: RelationshipType::Value,
            ids: vec!["v1".to_string()],
        });
        key.relationships.push(children(&["w1", "w2"]));

        let mut value = block(BlockType::KeyValueSet, "v1");
        value.entity_types.push("VALUE".to_string());
        value.relationships.push(children(&["w3"]));

        let doc = AnalyzedDocument::from_blocks(&[
            page,
            key,
            value,
            word("w1", "Full"),
            word("w2", "Name"),
            word("w3", "Jordan"),
        ]);
        assert_eq!(
            doc.pages[0].fields,
            vec![FormField {
                key: "Full Name".to_string(),
                value: Some("Jordan".to_string()),
            }]
        );
    }

    #[test]
    fn test_form_field_missing_value() {
        let mut page = block(BlockType::Page, "p1");
        page.relationships.push(children(&["k1"]));

        let mut key = block(BlockType::KeyValueSet, "k1");
        key.entity_types.push("KEY".to_string());
        key.relationships.push(children(&["w1"]));

        let doc = AnalyzedDocument::from_blocks(&[page, key, word("w1", "Phone")]);
        assert_eq!(doc.pages[0].fields[0].key, "Phone");
        assert_eq!(doc.pages[0].fields[0].value, None);
    }

    #[test]
    fn test_table_grid_ordering() {
        let mut page = block(BlockType::Page, "p1");
        page.relationships.push(children(&["t1"]));

        let mut table = block(BlockType::Table, "t1");
        // Cells listed out of order; indices decide placement.
        table.relationships.push(children(&["c22", "c11", "c21", "c12"]));

        let mut cells = Vec::new();
        for (id, row, col, text) in [
            ("c11", 1, 1, "a"),
            ("c12", 1, 2, "b"),
            ("c21", 2, 1, "c"),
            ("c22", 2, 2, "d"),
        ] {
            let mut cell = block(BlockType::Cell, id);
            cell.row_index = Some(row);
            cell.column_index = Some(col);
            cell.relationships.push(children(&[&format!("w-{id}")]));
            cells.push(cell);
            cells.push(word(&format!("w-{id}"), text));
        }

        let mut blocks = vec![page, table];
        blocks.extend(cells);
        let doc = AnalyzedDocument::from_blocks(&blocks);
        assert_eq!(
            doc.pages[0].tables[0].rows,
            vec![vec!["a".to_string(), "b".to_string()], vec![
                "c".to_string(),
                "d".to_string()
            ]]
        );
    }

    #[test]
    fn test_selection_element_renders_status() {
        let mut page = block(BlockType::Page, "p1");
        page.relationships.push(children(&["k1"]));

        let mut key = block(BlockType::KeyValueSet, "k1");
        key.entity_types.push("KEY".to_string());
        key.relationships.push(Relationship {
            relationship_type: RelationshipType::Value,
            ids: vec!["v1".to_string()],
        });
        key.relationships.push(children(&["w1"]));

        let mut value = block(BlockType::KeyValueSet, "v1");
        value.entity_types.push("VALUE".to_string());
        value.relationships.push(children(&["s1"]));

        let mut sel = block(BlockType::SelectionElement, "s1");
        sel.selection_status = Some(SelectionStatus::Selected);

        let doc =
            AnalyzedDocument::from_blocks(&[page, key, value, sel, word("w1", "Approved")]);
        assert_eq!(doc.pages[0].fields[0].value.as_deref(), Some("SELECTED"));
    }

    #[test]
    fn test_pages_numbered_from_attribute() {
        let mut p1 = block(BlockType::Page, "p1");
        p1.page = Some(1);
        let mut p2 = block(BlockType::Page, "p2");
        p2.page = Some(2);
        let doc = AnalyzedDocument::from_blocks(&[p1, p2]);
        assert_eq!(
            doc.pages.iter().map(|p| p.page_number).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }
}
