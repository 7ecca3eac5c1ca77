//! Structural virtual path construction.

use std::sync::Arc;

use crate::catalog::repository::{ContentRepository, VirtualPathBuilder};
use crate::catalog::types::{ContentNode, ContentRef, Locale};
use crate::routing::context::RequestContext;

/// Upper bound on tree depth when walking parents.
const MAX_DEPTH: usize = 64;

/// Builds `segment/segment/...` paths from a root down to a node.
///
/// The root itself contributes no segment, so the root's path is empty.
pub struct StructuralPathBuilder {
    repository: Arc<dyn ContentRepository>,
    root: ContentRef,
}

impl StructuralPathBuilder {
    pub fn new(repository: Arc<dyn ContentRepository>, root: ContentRef) -> Self {
        Self { repository, root }
    }
}

impl VirtualPathBuilder for StructuralPathBuilder {
    fn build_path(
        &self,
        _request: &RequestContext,
        node: &ContentNode,
        locale: &Locale,
    ) -> Option<String> {
        if node.link.eq_ignore_work_id(&self.root) {
            return Some(String::new());
        }

        let mut segments = vec![node.url_segment(locale).to_string()];
        let mut parent = node.parent;
        loop {
            // Reaching a tree root without passing the builder's root means
            // the node is detached from this part of the tree.
            let link = parent?;
            if link.eq_ignore_work_id(&self.root) {
                break;
            }
            if segments.len() > MAX_DEPTH {
                tracing::warn!(content_id = %node.link, "Content tree deeper than supported");
                return None;
            }
            let ancestor = self.repository.get(&link)?;
            segments.push(ancestor.url_segment(locale).to_string());
            parent = ancestor.parent;
        }

        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        segments.reverse();
        Some(segments.join("/"))
    }
}
