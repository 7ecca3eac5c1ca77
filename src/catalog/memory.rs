//! In-memory content repository and SEO index.
//!
//! # Responsibilities
//! - Load the content tree from a JSON fixture
//! - Reject duplicate ids, dangling parents and parent cycles
//! - Serve children in fixture order
//! - Keep the per-locale SEO index in sync on upsert

use dashmap::DashMap;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::catalog::repository::{ContentRepository, SeoUriResolver};
use crate::catalog::types::{ContentNode, ContentRef, Locale};

/// Errors raised while building the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate content id {0}")]
    Duplicate(u64),

    #[error("Content {id} references missing parent {parent}")]
    DanglingParent { id: u64, parent: u64 },

    #[error("Content {0} is part of a parent cycle")]
    Cycle(u64),
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    nodes: Vec<ContentNode>,
}

/// A thread-safe content tree with a flat SEO index.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    nodes: DashMap<u64, Arc<ContentNode>>,
    children: DashMap<u64, Vec<u64>>,
    seo_index: DashMap<(Locale, String), ContentRef>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of nodes. Children keep list order.
    pub fn from_nodes(nodes: Vec<ContentNode>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !ids.insert(node.link.id) {
                return Err(CatalogError::Duplicate(node.link.id));
            }
        }
        for node in &nodes {
            if let Some(parent) = node.parent {
                if !ids.contains(&parent.id) {
                    return Err(CatalogError::DanglingParent {
                        id: node.link.id,
                        parent: parent.id,
                    });
                }
            }
        }

        let catalog = Self::new();
        for node in nodes {
            catalog.index(node);
        }

        for id in &ids {
            let start = catalog.nodes.get(id).and_then(|n| n.parent);
            if catalog.ancestors_contain(start, *id) {
                return Err(CatalogError::Cycle(*id));
            }
        }

        Ok(catalog)
    }

    /// Parse a `{ "nodes": [...] }` fixture.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_json::from_str(json)?;
        Self::from_nodes(fixture.nodes)
    }

    /// Load a fixture from disk.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(path = ?path, nodes = catalog.len(), "Loaded catalog fixture");
        Ok(catalog)
    }

    /// Insert or replace a node.
    ///
    /// A node that keeps its parent keeps its position among its siblings.
    pub fn upsert(&self, node: ContentNode) -> Result<(), CatalogError> {
        let id = node.link.id;
        if let Some(parent) = node.parent {
            if !self.nodes.contains_key(&parent.id) {
                return Err(CatalogError::DanglingParent { id, parent: parent.id });
            }
            if parent.id == id || self.ancestors_contain(Some(parent), id) {
                return Err(CatalogError::Cycle(id));
            }
        }

        let previous_parent = self.nodes.get(&id).map(|n| n.parent);
        match previous_parent {
            Some(parent) if parent.map(|p| p.id) == node.parent.map(|p| p.id) => {
                self.seo_index.retain(|_, link| link.id != id);
                self.index_seo(&node);
                self.nodes.insert(id, Arc::new(node));
            }
            Some(_) => {
                self.unindex(id);
                self.index(node);
            }
            None => self.index(node),
        }
        Ok(())
    }

    /// Number of content items.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn index(&self, node: ContentNode) {
        if let Some(parent) = node.parent {
            self.children.entry(parent.id).or_default().push(node.link.id);
        }
        self.index_seo(&node);
        self.nodes.insert(node.link.id, Arc::new(node));
    }

    fn index_seo(&self, node: &ContentNode) {
        for (locale, seo_uri) in &node.seo_uris {
            let key = normalize_seo_path(seo_uri);
            if !key.is_empty() {
                self.seo_index
                    .insert((locale.clone(), key), node.link.published());
            }
        }
    }

    fn unindex(&self, id: u64) {
        if let Some((_, old)) = self.nodes.remove(&id) {
            if let Some(parent) = old.parent {
                if let Some(mut siblings) = self.children.get_mut(&parent.id) {
                    siblings.retain(|child| *child != id);
                }
            }
        }
        self.seo_index.retain(|_, link| link.id != id);
    }

    /// Walk up from `start`; bounded by the node count so cycles terminate.
    fn ancestors_contain(&self, start: Option<ContentRef>, target: u64) -> bool {
        let mut current = start;
        let mut steps = 0;
        while let Some(link) = current {
            if link.id == target || steps > self.nodes.len() {
                return true;
            }
            steps += 1;
            current = self.nodes.get(&link.id).and_then(|n| n.parent);
        }
        false
    }
}

fn normalize_seo_path(path: &str) -> String {
    path.trim_matches('/').to_ascii_lowercase()
}

impl ContentRepository for InMemoryCatalog {
    fn get(&self, link: &ContentRef) -> Option<Arc<ContentNode>> {
        self.nodes.get(&link.id).map(|r| r.value().clone())
    }

    fn children(&self, parent: &ContentRef) -> Vec<Arc<ContentNode>> {
        self.children
            .get(&parent.id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.nodes.get(id).map(|n| n.value().clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl SeoUriResolver for InMemoryCatalog {
    fn resolve(&self, path: &str, locale: &Locale) -> Option<ContentRef> {
        let key = normalize_seo_path(path);
        if key.is_empty() {
            return None;
        }
        self.seo_index
            .get(&(locale.clone(), key))
            .map(|r| *r.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::ContentKind;

    fn sample() -> Vec<ContentNode> {
        vec![
            ContentNode::new(1, None, ContentKind::Catalog, "Root", "root"),
            ContentNode::new(2, Some(1.into()), ContentKind::Category, "Shoes", "shoes"),
            ContentNode::new(3, Some(1.into()), ContentKind::Category, "Bags", "bags"),
            ContentNode::new(4, Some(2.into()), ContentKind::Product, "Runner", "runner")
                .with_seo_uri("en", "Runner-42"),
        ]
    }

    #[test]
    fn test_children_keep_order() {
        let catalog = InMemoryCatalog::from_nodes(sample()).unwrap();
        let names: Vec<_> = catalog
            .children(&ContentRef::new(1))
            .iter()
            .map(|n| n.name.clone())
            .collect();
        assert_eq!(names, vec!["Shoes", "Bags"]);
        assert!(catalog.children(&ContentRef::new(4)).is_empty());
    }

    #[test]
    fn test_get_ignores_work_id() {
        let catalog = InMemoryCatalog::from_nodes(sample()).unwrap();
        let node = catalog.get(&ContentRef::with_work_id(2, 9)).unwrap();
        assert_eq!(node.name, "Shoes");
    }

    #[test]
    fn test_seo_resolution_is_case_insensitive_and_scoped_by_locale() {
        let catalog = InMemoryCatalog::from_nodes(sample()).unwrap();
        let en = Locale::new("en");
        assert_eq!(catalog.resolve("runner-42", &en), Some(ContentRef::new(4)));
        assert_eq!(catalog.resolve("/RUNNER-42/", &en), Some(ContentRef::new(4)));
        assert_eq!(catalog.resolve("runner-42", &Locale::new("sv")), None);
        assert_eq!(catalog.resolve("", &en), None);
    }

    #[test]
    fn test_rejects_duplicates_and_dangling_parents() {
        let mut nodes = sample();
        nodes.push(ContentNode::new(2, None, ContentKind::Category, "Dup", "dup"));
        assert!(matches!(
            InMemoryCatalog::from_nodes(nodes),
            Err(CatalogError::Duplicate(2))
        ));

        let nodes = vec![ContentNode::new(5, Some(99.into()), ContentKind::Category, "X", "x")];
        assert!(matches!(
            InMemoryCatalog::from_nodes(nodes),
            Err(CatalogError::DanglingParent { id: 5, parent: 99 })
        ));
    }

    #[test]
    fn test_rejects_cycles() {
        let nodes = vec![
            ContentNode::new(1, Some(2.into()), ContentKind::Category, "A", "a"),
            ContentNode::new(2, Some(1.into()), ContentKind::Category, "B", "b"),
        ];
        assert!(matches!(
            InMemoryCatalog::from_nodes(nodes),
            Err(CatalogError::Cycle(_))
        ));

        let catalog = InMemoryCatalog::from_nodes(sample()).unwrap();
        let moved = ContentNode::new(2, Some(4.into()), ContentKind::Category, "Shoes", "shoes");
        assert!(matches!(catalog.upsert(moved), Err(CatalogError::Cycle(2))));
    }

    #[test]
    fn test_upsert_reindexes() {
        let catalog = InMemoryCatalog::from_nodes(sample()).unwrap();
        let en = Locale::new("en");

        let renamed = ContentNode::new(4, Some(2.into()), ContentKind::Product, "Runner", "runner")
            .with_seo_uri("en", "runner-43");
        catalog.upsert(renamed).unwrap();
        assert_eq!(catalog.resolve("runner-42", &en), None);
        assert_eq!(catalog.resolve("runner-43", &en), Some(ContentRef::new(4)));

        let moved = ContentNode::new(4, Some(3.into()), ContentKind::Product, "Runner", "runner");
        catalog.upsert(moved).unwrap();
        assert!(catalog.children(&ContentRef::new(2)).is_empty());
        assert_eq!(catalog.children(&ContentRef::new(3)).len(), 1);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "nodes": [
                { "link": { "id": 1 }, "name": "Root", "kind": "catalog", "route_segment": "root" },
                { "link": { "id": 2 }, "parent": { "id": 1 }, "name": "Shoes", "kind": "category",
                  "route_segment": "shoes", "localized_segments": { "SV": "skor" } }
            ]
        }"#;
        let catalog = InMemoryCatalog::from_json_str(json).unwrap();
        let shoes = catalog.get(&ContentRef::new(2)).unwrap();
        assert_eq!(shoes.url_segment(&Locale::new("sv")), "skor");
    }
}
