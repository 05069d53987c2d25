//! Render trees.
//!
//! A render tree is an ordered map. Keys starting with [`META_PREFIX`] hold
//! properties (`#type`, `#title`, `#weight`, ...). Every other key holds a
//! child element.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

pub const META_PREFIX: char = '#';

/// Whether `key` names a property rather than a child element.
pub fn is_meta_key(key: &str) -> bool {
    key.starts_with(META_PREFIX)
}

/// A property value or a nested element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderNode {
    Property(Value),
    Element(RenderTree),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderTree {
    entries: IndexMap<String, RenderNode>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(key, value);
        self
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries
            .insert(key.into(), RenderNode::Property(value.into()));
    }

    /// Insert or replace a child element, keeping the key's position if it
    /// already exists.
    pub fn insert_element(&mut self, key: impl Into<String>, element: RenderTree) {
        self.entries.insert(key.into(), RenderNode::Element(element));
    }

    pub fn insert(&mut self, key: impl Into<String>, node: RenderNode) {
        self.entries.insert(key.into(), node);
    }

    pub fn get(&self, key: &str) -> Option<&RenderNode> {
        self.entries.get(key)
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        match self.entries.get(key) {
            Some(RenderNode::Property(value)) => Some(value),
            _ => None,
        }
    }

    pub fn element(&self, key: &str) -> Option<&RenderTree> {
        match self.entries.get(key) {
            Some(RenderNode::Element(tree)) => Some(tree),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, key: &str) -> Option<&mut RenderTree> {
        match self.entries.get_mut(key) {
            Some(RenderNode::Element(tree)) => Some(tree),
            _ => None,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<RenderNode> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Child elements in order, skipping properties.
    pub fn children(&self) -> impl Iterator<Item = (&str, &RenderTree)> {
        self.entries.iter().filter_map(|(k, node)| match node {
            RenderNode::Element(tree) if !is_meta_key(k) => Some((k.as_str(), tree)),
            _ => None,
        })
    }

    /// Keys of child elements in order.
    pub fn child_keys(&self) -> Vec<&str> {
        self.children().map(|(k, _)| k).collect()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, RenderNode)> {
        self.entries.into_iter()
    }

    /// Overlay `other`: its keys replace ours in place, new keys are appended.
    pub fn merge(&mut self, other: RenderTree) {
        for (key, node) in other.entries {
            self.entries.insert(key, node);
        }
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &RenderNode) -> bool) {
        self.entries.retain(|k, node| keep(k, node));
    }

    /// The `#weight` property as an integer.
    pub fn weight(&self) -> Option<i64> {
        self.property("#weight").and_then(Value::as_i64)
    }

    /// The `#type` property as text.
    pub fn element_type(&self) -> Option<&str> {
        self.property("#type").and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meta_keys() {
        assert!(is_meta_key("#title"));
        assert!(!is_meta_key("instance_id"));
        assert!(!is_meta_key(""));
    }

    #[test]
    fn children_skip_properties() {
        let mut tree = RenderTree::new().with_property("#type", "details");
        tree.insert_element("name", RenderTree::new().with_property("#weight", 2));
        tree.insert_element("uid", RenderTree::new());
        assert_eq!(tree.child_keys(), vec!["name", "uid"]);
        assert_eq!(tree.element("name").unwrap().weight(), Some(2));
        assert_eq!(tree.element_type(), Some("details"));
    }

    #[test]
    fn merge_overlays_in_place() {
        let mut base = RenderTree::new().with_property("#a", 1);
        base.insert_element("x", RenderTree::new());
        let overlay = RenderTree::new()
            .with_property("#a", 2)
            .with_property("#b", 3);
        base.merge(overlay);
        assert_eq!(base.keys().collect::<Vec<_>>(), vec!["#a", "x", "#b"]);
        assert_eq!(base.property("#a"), Some(&json!(2)));
    }

    #[test]
    fn serializes_as_nested_object() {
        let mut tree = RenderTree::new().with_property("#title", "Volume");
        tree.insert_element("state", RenderTree::new().with_property("#items", json!(["in-use"])));
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({"#title": "Volume", "state": {"#items": ["in-use"]}})
        );
    }
}
