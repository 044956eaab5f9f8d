//! Tree building from flat, ordered material lists.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use lectern_entity::material::{Material, MaterialNode};

/// Builds a forest from a flat list of materials.
///
/// The input must already be ordered the way siblings should appear
/// (ascending level, then sort order); relative order is preserved.
/// Nodes whose parent is absent from the list are treated as roots,
/// which is how inactive-filtered views surface active children of a
/// deactivated category.
pub fn build_tree(materials: &[Material]) -> Vec<MaterialNode> {
    let ids: HashSet<Uuid> = materials.iter().map(|m| m.id).collect();

    let mut children_of: HashMap<Option<Uuid>, Vec<&Material>> = HashMap::new();
    for material in materials {
        let slot = match material.parent_id {
            Some(parent_id) if ids.contains(&parent_id) => Some(parent_id),
            _ => None,
        };
        children_of.entry(slot).or_default().push(material);
    }

    children_of
        .get(&None)
        .map(|roots| roots.iter().map(|m| attach(m, &children_of)).collect())
        .unwrap_or_default()
}

fn attach(material: &Material, children_of: &HashMap<Option<Uuid>, Vec<&Material>>) -> MaterialNode {
    let mut node = MaterialNode::from_material(material);
    if let Some(children) = children_of.get(&Some(material.id)) {
        node.children = children.iter().map(|c| attach(c, children_of)).collect();
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lectern_entity::material::MaterialKind;

    fn material(
        id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
        level: i32,
        sort_order: Option<i32>,
    ) -> Material {
        let now = Utc::now();
        Material {
            id,
            storage_key: Uuid::new_v4(),
            display_name: name.to_string(),
            parent_id,
            level,
            sort_order,
            kind: MaterialKind::Category,
            is_active: true,
            is_favorite: false,
            original_file_name: None,
            total_pages: None,
            uploaded_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn count_nodes(forest: &[MaterialNode]) -> usize {
        forest.iter().map(MaterialNode::subtree_size).sum()
    }

    #[test]
    fn empty_input_builds_empty_forest() {
        assert!(build_tree(&[]).is_empty());
    }

    #[test]
    fn nests_children_under_parents() {
        let root_id = Uuid::new_v4();
        let sub_id = Uuid::new_v4();
        let leaf_id = Uuid::new_v4();
        let materials = vec![
            material(root_id, "Root", None, 0, Some(0)),
            material(sub_id, "Sub", Some(root_id), 1, Some(0)),
            material(leaf_id, "Leaf", Some(sub_id), 2, Some(0)),
        ];

        let forest = build_tree(&materials);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, root_id);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].id, sub_id);
        assert_eq!(forest[0].children[0].children[0].id, leaf_id);
        assert_eq!(count_nodes(&forest), materials.len());
    }

    #[test]
    fn every_input_node_appears_exactly_once() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let d = Uuid::new_v4();
        let materials = vec![
            material(a, "A", None, 0, Some(0)),
            material(b, "B", None, 0, Some(1)),
            material(c, "C", Some(a), 1, Some(0)),
            material(d, "D", Some(a), 1, Some(1)),
        ];

        let forest = build_tree(&materials);

        assert_eq!(count_nodes(&forest), 4);
        let mut seen = HashSet::new();
        fn collect(node: &MaterialNode, seen: &mut HashSet<Uuid>) {
            assert!(seen.insert(node.id), "node appeared twice");
            for child in &node.children {
                collect(child, seen);
            }
        }
        for root in &forest {
            collect(root, &mut seen);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn sibling_order_follows_input_order() {
        let root_id = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let third = Uuid::new_v4();
        let materials = vec![
            material(root_id, "Root", None, 0, Some(0)),
            material(first, "First", Some(root_id), 1, Some(0)),
            material(second, "Second", Some(root_id), 1, Some(1)),
            material(third, "Third", Some(root_id), 1, Some(2)),
        ];

        let forest = build_tree(&materials);

        let children: Vec<Uuid> = forest[0].children.iter().map(|c| c.id).collect();
        assert_eq!(children, vec![first, second, third]);
    }

    #[test]
    fn orphan_becomes_a_root() {
        let missing_parent = Uuid::new_v4();
        let orphan_id = Uuid::new_v4();
        let materials = vec![material(orphan_id, "Orphan", Some(missing_parent), 1, None)];

        let forest = build_tree(&materials);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, orphan_id);
        assert!(forest[0].children.is_empty());
    }

    #[test]
    fn input_is_not_mutated() {
        let root_id = Uuid::new_v4();
        let materials = vec![
            material(root_id, "Root", None, 0, None),
            material(Uuid::new_v4(), "Child", Some(root_id), 1, None),
        ];
        let snapshot = materials.clone();

        let _ = build_tree(&materials);

        assert_eq!(materials.len(), snapshot.len());
        for (before, after) in snapshot.iter().zip(materials.iter()) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.parent_id, after.parent_id);
        }
    }
}
