//! Git tree listings returned for directory expressions.

use serde::Deserialize;

/// A directory listing.
///
/// An expression resolving to something other than a tree comes back as an
/// empty object, which decodes to a tree without entries.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree<O> {
    #[serde(default)]
    pub entries: Vec<TreeEntry<O>>,
}

/// One entry of a tree listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry<O> {
    /// File or directory name.
    pub name: String,

    /// Git object type.
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Object payload. Submodule entries carry `null`.
    #[serde(default)]
    pub object: Option<O>,
}

/// Git object type of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
    #[serde(other)]
    Other,
}

/// Payload of a file entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlobObject {
    /// File contents. `None` for binary blobs and non-blob entries.
    #[serde(default)]
    pub text: Option<String>,
}

/// Payload of an entry directly under `plugins`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolderObject {
    /// Children of the folder. Empty for non-tree entries.
    #[serde(default)]
    pub entries: Vec<TreeEntry<BlobObject>>,
}

impl<O> TreeEntry<O> {
    /// Whether the entry is a file.
    pub fn is_blob(&self) -> bool {
        self.kind == EntryKind::Blob
    }

    /// Whether the entry is a directory.
    pub fn is_tree(&self) -> bool {
        self.kind == EntryKind::Tree
    }
}

impl TreeEntry<BlobObject> {
    /// Text of a file entry, if it is a file with text content.
    pub fn text(&self) -> Option<&str> {
        if !self.is_blob() {
            return None;
        }
        self.object.as_ref().and_then(|blob| blob.text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_tree_object_decodes_as_empty_tree() {
        let tree: Tree<BlobObject> = serde_json::from_str("{}").unwrap();
        assert!(tree.entries.is_empty());
    }

    #[test]
    fn text_requires_blob() {
        let entry: TreeEntry<BlobObject> =
            serde_json::from_str(r#"{ "name": "x", "type": "tree", "object": { "text": "lune" } }"#)
                .unwrap();
        assert_eq!(entry.text(), None);
    }

    #[test]
    fn submodule_entries_decode() {
        let entry: TreeEntry<FolderObject> =
            serde_json::from_str(r#"{ "name": "vendored", "type": "commit", "object": null }"#)
                .unwrap();

        assert_eq!(entry.kind, EntryKind::Other);
        assert!(entry.object.is_none());
    }
}
