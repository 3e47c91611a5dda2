use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Comments attached to anchors of one file, keyed `"<file>:<line>"`.
///
/// Entries iterate in ascending line order. Serializes to a JSON object with
/// string keys in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentsMap {
    file: String,
    entries: BTreeMap<usize, Vec<String>>,
}

impl CommentsMap {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Output key for `line`.
    pub fn key(&self, line: usize) -> String {
        format!("{}:{}", self.file, line)
    }

    pub fn get(&self, line: usize) -> Option<&[String]> {
        self.entries.get(&line).map(Vec::as_slice)
    }

    /// Look up by a full `"<file>:<line>"` key.
    pub fn get_key(&self, key: &str) -> Option<&[String]> {
        let (file, line) = key.rsplit_once(':')?;
        if file != self.file {
            return None;
        }
        self.get(line.parse().ok()?)
    }

    pub fn contains_line(&self, line: usize) -> bool {
        self.entries.contains_key(&line)
    }

    /// Store `comments` under `line` unless the line already has an entry.
    /// Returns whether the entry was written.
    pub(crate) fn insert_first(&mut self, line: usize, comments: Vec<String>) -> bool {
        use std::collections::btree_map::Entry;
        match self.entries.entry(line) {
            Entry::Vacant(slot) => {
                slot.insert(comments);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.entries
            .iter()
            .map(|(line, comments)| (*line, comments.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.keys().map(|line| self.key(*line))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of attached comments across all keys.
    pub fn comment_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl Serialize for CommentsMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (line, comments) in &self.entries {
            map.serialize_entry(&self.key(*line), comments)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_writer_wins() {
        let mut map = CommentsMap::new("a.go");
        assert!(map.insert_first(3, vec!["// one".to_string()]));
        assert!(!map.insert_first(3, vec!["// two".to_string()]));
        assert_eq!(map.get(3), Some(&["// one".to_string()][..]));
    }

    #[test]
    fn test_get_key() {
        let mut map = CommentsMap::new("a.go");
        map.insert_first(12, vec!["// x".to_string()]);
        assert_eq!(map.get_key("a.go:12").map(<[String]>::len), Some(1));
        assert!(map.get_key("b.go:12").is_none());
        assert!(map.get_key("a.go:x").is_none());
        assert!(map.get_key("a.go").is_none());
    }

    #[test]
    fn test_serializes_in_line_order() {
        let mut map = CommentsMap::new("a.go");
        map.insert_first(10, vec!["// ten".to_string()]);
        map.insert_first(2, vec!["// two".to_string(), "// two b".to_string()]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"a.go:2":["// two","// two b"],"a.go:10":["// ten"]}"#);
        assert_eq!(map.comment_count(), 3);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a.go:2", "a.go:10"]);
    }

    #[test]
    fn test_empty_map_serializes_to_empty_object() {
        let map = CommentsMap::new("code.go");
        assert_eq!(serde_json::to_string(&map).unwrap(), "{}");
        assert!(map.is_empty());
    }
}
