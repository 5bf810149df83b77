//! Spend type display formatting
//!
//! Renders the spend type forest as an indented tree.

use std::collections::{HashMap, HashSet};

use crate::models::{SpendType, SpendTypeId};

/// Format spend types as a tree, roots and siblings in id order
///
/// Types whose parent is missing are shown as roots. Types caught in a
/// parent cycle are listed at the end.
pub fn format_spend_type_tree(types: &[SpendType]) -> String {
    if types.is_empty() {
        return "No spend types found.\n\nRun 'budget type add <name>' to create one.\n".to_string();
    }

    let known: HashSet<SpendTypeId> = types.iter().map(|t| t.id).collect();
    let mut children: HashMap<Option<SpendTypeId>, Vec<&SpendType>> = HashMap::new();
    for spend_type in types {
        let parent = spend_type.parent_id.filter(|p| known.contains(p));
        children.entry(parent).or_default().push(spend_type);
    }
    for list in children.values_mut() {
        list.sort_by_key(|t| t.id);
    }

    let mut output = String::new();
    let mut shown = HashSet::new();
    if let Some(roots) = children.get(&None) {
        for root in roots {
            output.push_str(&format!("{} (id {})\n", root.name, root.id));
            shown.insert(root.id);
            write_children(&children, root.id, "", &mut shown, &mut output);
        }
    }

    let mut unreachable: Vec<&SpendType> = types.iter().filter(|t| !shown.contains(&t.id)).collect();
    if !unreachable.is_empty() {
        unreachable.sort_by_key(|t| t.id);
        output.push_str("\nIn a parent cycle:\n");
        for spend_type in unreachable {
            output.push_str(&format!(
                "  {} (id {}, parent {})\n",
                spend_type.name,
                spend_type.id,
                spend_type.parent_or_none()
            ));
        }
    }

    output
}

fn write_children(
    children: &HashMap<Option<SpendTypeId>, Vec<&SpendType>>,
    parent: SpendTypeId,
    indent: &str,
    shown: &mut HashSet<SpendTypeId>,
    output: &mut String,
) {
    let Some(list) = children.get(&Some(parent)) else {
        return;
    };

    for (i, child) in list.iter().enumerate() {
        if !shown.insert(child.id) {
            continue;
        }
        let is_last = i == list.len() - 1;
        let prefix = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{}{}{} (id {})\n", indent, prefix, child.name, child.id));

        let next_indent = format!("{}{}", indent, if is_last { "    " } else { "│   " });
        write_children(children, child.id, &next_indent, shown, output);
    }
}
