//! Pure search and traversal helpers over a component forest.
//!
//! The tree keeps no parent back-references: a node's parent is found by a
//! depth-first search on demand, which is cheap at page-builder sizes (tens
//! to low hundreds of nodes). Lookups return `None` instead of failing.

use std::collections::HashSet;

use crate::error::{BuilderError, BuilderResult};
use crate::node::{ComponentId, ComponentNode, ComponentType};

/// Where a node sits in the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLocation {
    /// Owning parent, `None` for top-level nodes.
    pub parent: Option<ComponentId>,
    /// Position among its siblings.
    pub index: usize,
}

/// One row of a flattened tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatNode {
    /// Node id.
    pub id: ComponentId,
    /// Node type.
    pub component_type: ComponentType,
    /// Nesting depth, 0 for top-level nodes.
    pub depth: usize,
    /// Owning parent.
    pub parent: Option<ComponentId>,
}

/// Depth-first search for a node.
#[must_use]
pub fn find_by_id(nodes: &[ComponentNode], id: ComponentId) -> Option<&ComponentNode> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_by_id(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Depth-first search for a node, mutably.
pub fn find_by_id_mut(nodes: &mut [ComponentNode], id: ComponentId) -> Option<&mut ComponentNode> {
    for node in nodes.iter_mut() {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_by_id_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Find the parent and sibling index of a node.
#[must_use]
pub fn locate(nodes: &[ComponentNode], id: ComponentId) -> Option<NodeLocation> {
    locate_in(nodes, None, id)
}

fn locate_in(
    nodes: &[ComponentNode],
    parent: Option<ComponentId>,
    id: ComponentId,
) -> Option<NodeLocation> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id() == id {
            return Some(NodeLocation { parent, index });
        }
        if let Some(location) = locate_in(&node.children, Some(node.id()), id) {
            return Some(location);
        }
    }
    None
}

/// The sibling list owned by `parent` (the forest itself for `None`).
pub fn children_mut(
    nodes: &mut Vec<ComponentNode>,
    parent: Option<ComponentId>,
) -> Option<&mut Vec<ComponentNode>> {
    match parent {
        None => Some(nodes),
        Some(parent_id) => find_by_id_mut(nodes, parent_id).map(|node| &mut node.children),
    }
}

/// Detach a node (and its subtree) from wherever it is.
pub fn remove(nodes: &mut Vec<ComponentNode>, id: ComponentId) -> Option<ComponentNode> {
    let location = locate(nodes, id)?;
    let siblings = children_mut(nodes, location.parent)?;
    Some(siblings.remove(location.index))
}

/// Insert a node under `parent` at `index` (appended when `None`, clamped
/// to the sibling count otherwise).
///
/// # Errors
///
/// Returns [`BuilderError::ComponentNotFound`] if the parent does not exist
/// and [`BuilderError::LeafWithChildren`] if it cannot own children.
pub fn insert(
    nodes: &mut Vec<ComponentNode>,
    parent: Option<ComponentId>,
    index: Option<usize>,
    node: ComponentNode,
) -> BuilderResult<()> {
    let siblings = match parent {
        None => nodes,
        Some(parent_id) => {
            let parent_node =
                find_by_id_mut(nodes, parent_id).ok_or(BuilderError::ComponentNotFound(parent_id))?;
            if !parent_node.component_type().is_container() {
                return Err(BuilderError::LeafWithChildren {
                    id: parent_id,
                    component_type: parent_node.component_type(),
                });
            }
            &mut parent_node.children
        }
    };
    let at = index.map_or(siblings.len(), |i| i.min(siblings.len()));
    siblings.insert(at, node);
    Ok(())
}

/// Deep copy of a subtree with fresh ids for every node in it.
#[must_use]
pub fn clone_subtree(node: &ComponentNode) -> ComponentNode {
    let mut copy = node.clone();
    reassign_ids(&mut copy);
    copy
}

fn reassign_ids(node: &mut ComponentNode) {
    node.reassign_id(ComponentId::new());
    for child in &mut node.children {
        reassign_ids(child);
    }
}

/// Whether `id` appears strictly below `node`.
#[must_use]
pub fn is_descendant(node: &ComponentNode, id: ComponentId) -> bool {
    node.children
        .iter()
        .any(|child| child.id() == id || is_descendant(child, id))
}

/// All ids in pre-order.
#[must_use]
pub fn collect_ids(nodes: &[ComponentNode]) -> Vec<ComponentId> {
    let mut ids = Vec::new();
    walk(nodes, &mut |node, _| ids.push(node.id()));
    ids
}

/// Ids that occur more than once, in order of their second occurrence.
#[must_use]
pub fn duplicate_ids(nodes: &[ComponentNode]) -> Vec<ComponentId> {
    let mut seen = HashSet::new();
    collect_ids(nodes)
        .into_iter()
        .filter(|id| !seen.insert(*id))
        .collect()
}

/// Total number of nodes.
#[must_use]
pub fn count(nodes: &[ComponentNode]) -> usize {
    nodes.iter().map(|node| 1 + count(&node.children)).sum()
}

/// Check the structural invariants of a forest loaded from outside.
///
/// # Errors
///
/// Returns the first duplicate id or leaf-with-children violation found.
pub fn validate(nodes: &[ComponentNode]) -> BuilderResult<()> {
    if let Some(id) = duplicate_ids(nodes).first() {
        return Err(BuilderError::DuplicateId(*id));
    }
    let mut violation = None;
    walk(nodes, &mut |node, _| {
        if violation.is_none()
            && !node.component_type().is_container()
            && !node.children.is_empty()
        {
            violation = Some(BuilderError::LeafWithChildren {
                id: node.id(),
                component_type: node.component_type(),
            });
        }
    });
    violation.map_or(Ok(()), Err)
}

/// Pre-order list of nodes, descending only into subtrees where `is_open`
/// holds (collapsed layers stay folded).
pub fn flatten<F>(nodes: &[ComponentNode], is_open: F) -> Vec<FlatNode>
where
    F: Fn(&ComponentNode) -> bool,
{
    let mut out = Vec::new();
    flatten_into(nodes, None, 0, &is_open, &mut out);
    out
}

fn flatten_into<F>(
    nodes: &[ComponentNode],
    parent: Option<ComponentId>,
    depth: usize,
    is_open: &F,
    out: &mut Vec<FlatNode>,
) where
    F: Fn(&ComponentNode) -> bool,
{
    for node in nodes {
        out.push(FlatNode {
            id: node.id(),
            component_type: node.component_type(),
            depth,
            parent,
        });
        if !node.children.is_empty() && is_open(node) {
            flatten_into(&node.children, Some(node.id()), depth + 1, is_open, out);
        }
    }
}

fn walk<F>(nodes: &[ComponentNode], f: &mut F)
where
    F: FnMut(&ComponentNode, usize),
{
    fn go<F>(nodes: &[ComponentNode], depth: usize, f: &mut F)
    where
        F: FnMut(&ComponentNode, usize),
    {
        for node in nodes {
            f(node, depth);
            go(&node.children, depth + 1, f);
        }
    }
    go(nodes, 0, f);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<ComponentNode>, ComponentId, ComponentId, ComponentId) {
        let text = ComponentNode::new(ComponentType::Text);
        let button = ComponentNode::new(ComponentType::Button);
        let (text_id, button_id) = (text.id(), button.id());
        let section = ComponentNode::new(ComponentType::Section)
            .with_child(ComponentNode::new(ComponentType::Container).with_child(text))
            .with_child(button);
        let section_id = section.id();
        (
            vec![section, ComponentNode::new(ComponentType::Image)],
            section_id,
            text_id,
            button_id,
        )
    }

    #[test]
    fn test_find_nested() {
        let (nodes, _, text_id, _) = sample();
        let found = find_by_id(&nodes, text_id).expect("text should be found");
        assert_eq!(found.component_type(), ComponentType::Text);
        assert!(find_by_id(&nodes, ComponentId::new()).is_none());
    }

    #[test]
    fn test_locate_reports_parent_and_index() {
        let (nodes, section_id, _, button_id) = sample();
        let location = locate(&nodes, button_id).expect("button should be located");
        assert_eq!(location.parent, Some(section_id));
        assert_eq!(location.index, 1);

        let top = locate(&nodes, section_id).expect("section should be located");
        assert_eq!(top.parent, None);
        assert_eq!(top.index, 0);
    }

    #[test]
    fn test_remove_subtree() {
        let (mut nodes, section_id, text_id, _) = sample();
        let removed = remove(&mut nodes, section_id).expect("section removed");
        assert_eq!(count(std::slice::from_ref(&removed)), 4);
        assert!(find_by_id(&nodes, text_id).is_none());
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_insert_clamps_index() {
        let (mut nodes, section_id, _, _) = sample();
        let node = ComponentNode::new(ComponentType::Heading);
        let id = node.id();
        insert(&mut nodes, Some(section_id), Some(99), node).expect("insert");
        let location = locate(&nodes, id).expect("inserted");
        assert_eq!(location.index, 2);
    }

    #[test]
    fn test_insert_under_leaf_is_rejected() {
        let (mut nodes, _, text_id, _) = sample();
        let err = insert(
            &mut nodes,
            Some(text_id),
            None,
            ComponentNode::new(ComponentType::Text),
        )
        .expect_err("leaf parent");
        assert!(matches!(err, BuilderError::LeafWithChildren { .. }));
    }

    #[test]
    fn test_clone_subtree_generates_new_ids() {
        let (nodes, _, _, _) = sample();
        let copy = clone_subtree(&nodes[0]);
        let original_ids: HashSet<_> = collect_ids(&nodes[..1]).into_iter().collect();
        let copy_ids = collect_ids(std::slice::from_ref(&copy));
        assert_eq!(copy_ids.len(), original_ids.len());
        assert!(copy_ids.iter().all(|id| !original_ids.contains(id)));
        assert_eq!(copy.children.len(), nodes[0].children.len());
    }

    #[test]
    fn test_is_descendant() {
        let (nodes, _, text_id, _) = sample();
        assert!(is_descendant(&nodes[0], text_id));
        assert!(!is_descendant(&nodes[1], text_id));
        assert!(!is_descendant(&nodes[0], nodes[0].id()));
    }

    #[test]
    fn test_validate_detects_duplicates() {
        let (mut nodes, _, _, _) = sample();
        assert!(validate(&nodes).is_ok());
        let dup = nodes[1].clone();
        nodes.push(dup);
        assert!(matches!(validate(&nodes), Err(BuilderError::DuplicateId(_))));
    }

    #[test]
    fn test_validate_detects_leaf_children() {
        let nodes = vec![ComponentNode::new(ComponentType::Button)
            .with_child(ComponentNode::new(ComponentType::Text))];
        assert!(matches!(
            validate(&nodes),
            Err(BuilderError::LeafWithChildren { .. })
        ));
    }

    #[test]
    fn test_flatten_respects_open_subtrees() {
        let (nodes, section_id, _, _) = sample();
        let all = flatten(&nodes, |_| true);
        assert_eq!(all.len(), 5);
        assert_eq!(all[2].depth, 2);

        let folded = flatten(&nodes, |node| node.id() == section_id);
        // section, container (closed), button, image
        assert_eq!(folded.len(), 4);
        assert!(folded.iter().all(|row| row.component_type != ComponentType::Text));
    }
}
