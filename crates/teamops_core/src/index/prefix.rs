//! Prefix index over lowercased employee names.
//!
//! # Responsibility
//! - Map every prefix of an inserted name to the employee ids sharing it.
//! - Answer prefix lookups in O(prefix length) without traversal.
//!
//! # Invariants
//! - Append-only: there is no deletion path in scope.
//! - Ids are stored at every prefix node, deduplicated, in insertion
//!   order.
//! - Lookup results are capped at [`MAX_PREFIX_RESULTS`].
//!
//! Nodes live in an arena indexed by `usize` handles; each node holds a
//! child lookup (`char` -> node index) and a small ordered id list.

use crate::model::employee::EmployeeId;
use std::collections::HashMap;

/// Maximum number of ids returned by a single prefix lookup.
pub const MAX_PREFIX_RESULTS: usize = 50;

const ROOT: usize = 0;

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, usize>,
    ids: Vec<EmployeeId>,
    is_terminal: bool,
}

/// Arena-backed trie from lowercase name prefixes to employee ids.
#[derive(Debug)]
pub struct PrefixIndex {
    nodes: Vec<TrieNode>,
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixIndex {
    /// Creates an empty index holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Associates `employee_id` with every prefix of the lowercased name,
    /// from length 1 to the full name, and marks the full-name node as a
    /// terminal entry.
    ///
    /// Idempotent: re-inserting the same `(name, id)` pair leaves the
    /// structure equivalent.
    pub fn insert(&mut self, name: &str, employee_id: EmployeeId) {
        let mut current = ROOT;
        for ch in name.to_lowercase().chars() {
            let next = match self.nodes[current].children.get(&ch) {
                Some(&index) => index,
                None => {
                    let index = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children.insert(ch, index);
                    index
                }
            };
            current = next;

            let node = &mut self.nodes[current];
            if !node.ids.contains(&employee_id) {
                node.ids.push(employee_id);
            }
        }

        // The root carries no ids; an empty name marks nothing.
        if current != ROOT {
            self.nodes[current].is_terminal = true;
        }
    }

    /// Returns the employee ids stored at the lowercased prefix node, in
    /// insertion order, capped at [`MAX_PREFIX_RESULTS`].
    ///
    /// Unknown or blank prefixes produce an empty result, never an error.
    pub fn search_prefix(&self, prefix: &str) -> Vec<EmployeeId> {
        let normalized = prefix.trim().to_lowercase();
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut current = ROOT;
        for ch in normalized.chars() {
            match self.nodes[current].children.get(&ch) {
                Some(&index) => current = index,
                None => return Vec::new(),
            }
        }

        self.nodes[current]
            .ids
            .iter()
            .copied()
            .take(MAX_PREFIX_RESULTS)
            .collect()
    }

    /// Returns whether the exact lowercased name was inserted.
    pub fn contains_name(&self, name: &str) -> bool {
        let normalized = name.trim().to_lowercase();
        if normalized.is_empty() {
            return false;
        }

        let mut current = ROOT;
        for ch in normalized.chars() {
            match self.nodes[current].children.get(&ch) {
                Some(&index) => current = index,
                None => return false,
            }
        }

        self.nodes[current].is_terminal
    }

    /// Discards all entries, keeping only the root node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(TrieNode::default());
    }
}

#[cfg(test)]
mod tests {
    use super::{PrefixIndex, MAX_PREFIX_RESULTS};
    use uuid::Uuid;

    #[test]
    fn every_prefix_of_an_inserted_name_matches() {
        let mut index = PrefixIndex::new();
        let id = Uuid::new_v4();
        index.insert("Alice Smith", id);

        let full = "alice smith";
        for end in 1..=full.chars().count() {
            let prefix: String = full.chars().take(end).collect();
            assert_eq!(index.search_prefix(&prefix), vec![id], "prefix `{prefix}`");
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut index = PrefixIndex::new();
        let id = Uuid::new_v4();
        index.insert("Alice", id);

        assert_eq!(index.search_prefix("ALI"), vec![id]);
        assert_eq!(index.search_prefix("aLiCe"), vec![id]);
    }

    #[test]
    fn unknown_and_blank_prefixes_return_empty() {
        let mut index = PrefixIndex::new();
        index.insert("Alice", Uuid::new_v4());

        assert!(index.search_prefix("bob").is_empty());
        assert!(index.search_prefix("").is_empty());
        assert!(index.search_prefix("   ").is_empty());
        assert!(index.search_prefix("alicex").is_empty());
    }

    #[test]
    fn reinsert_is_idempotent() {
        let mut index = PrefixIndex::new();
        let id = Uuid::new_v4();
        index.insert("Alice", id);
        index.insert("Alice", id);

        assert_eq!(index.search_prefix("a"), vec![id]);
        assert_eq!(index.search_prefix("alice"), vec![id]);
    }

    #[test]
    fn shared_prefixes_keep_insertion_order() {
        let mut index = PrefixIndex::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        index.insert("Alice", first);
        index.insert("Alan", second);

        assert_eq!(index.search_prefix("al"), vec![first, second]);
        assert_eq!(index.search_prefix("ali"), vec![first]);
        assert_eq!(index.search_prefix("ala"), vec![second]);
    }

    #[test]
    fn results_are_capped() {
        let mut index = PrefixIndex::new();
        for _ in 0..(MAX_PREFIX_RESULTS + 10) {
            index.insert("ann", Uuid::new_v4());
        }

        assert_eq!(index.search_prefix("an").len(), MAX_PREFIX_RESULTS);
    }

    #[test]
    fn terminal_marks_full_names_only() {
        let mut index = PrefixIndex::new();
        index.insert("Alice", Uuid::new_v4());

        assert!(index.contains_name("alice"));
        assert!(index.contains_name("ALICE"));
        assert!(!index.contains_name("ali"));
        assert!(!index.contains_name(""));
    }

    #[test]
    fn clear_discards_all_entries() {
        let mut index = PrefixIndex::new();
        index.insert("Alice", Uuid::new_v4());
        index.clear();

        assert!(index.search_prefix("a").is_empty());
        assert!(!index.contains_name("alice"));
    }
}
