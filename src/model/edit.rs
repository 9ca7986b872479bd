//! Reversible positional edits
//!
//! An [`Edit`] describes one textual change at a byte offset and carries
//! both the removed and the inserted text, so it can be applied forward or
//! inverted without consulting any other state.

use crate::error::{check_range, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of edit operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditKind {
    /// Text was inserted at the position
    Insert,
    /// Text was removed at the position
    Delete,
    /// Text at the position was removed and other text put in its place
    Replace,
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditKind::Insert => "Insert",
            EditKind::Delete => "Delete",
            EditKind::Replace => "Replace",
        };
        f.write_str(name)
    }
}

/// Represents a single edit operation in the buffer's history
///
/// `position` is a byte offset into the content *before* the edit for
/// [`Edit::apply`], and into the content *after* the edit for
/// [`Edit::invert`]. `removed_text` is empty for inserts and
/// `inserted_text` is empty for deletes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EditFields")]
pub struct Edit {
    kind: EditKind,
    position: usize,
    removed_text: String,
    inserted_text: String,
}

/// Serialized form of an [`Edit`], checked against its kind on the way in
#[derive(Deserialize)]
struct EditFields {
    kind: EditKind,
    position: usize,
    removed_text: String,
    inserted_text: String,
}

impl TryFrom<EditFields> for Edit {
    type Error = String;

    fn try_from(fields: EditFields) -> std::result::Result<Self, Self::Error> {
        match fields.kind {
            EditKind::Insert if !fields.removed_text.is_empty() => {
                Err("Insert edit must not carry removed_text".to_string())
            }
            EditKind::Delete if !fields.inserted_text.is_empty() => {
                Err("Delete edit must not carry inserted_text".to_string())
            }
            kind => Ok(Self {
                kind,
                position: fields.position,
                removed_text: fields.removed_text,
                inserted_text: fields.inserted_text,
            }),
        }
    }
}

impl Edit {
    /// Create a new insert edit
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Insert,
            position,
            removed_text: String::new(),
            inserted_text: text.into(),
        }
    }

    /// Create a new delete edit that removes `removed_text` at `position`
    pub fn delete(position: usize, removed_text: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Delete,
            position,
            removed_text: removed_text.into(),
            inserted_text: String::new(),
        }
    }

    /// Create a new replace edit
    pub fn replace(
        position: usize,
        removed_text: impl Into<String>,
        inserted_text: impl Into<String>,
    ) -> Self {
        Self {
            kind: EditKind::Replace,
            position,
            removed_text: removed_text.into(),
            inserted_text: inserted_text.into(),
        }
    }

    /// Compute the smallest single edit that turns `before` into `after`.
    ///
    /// The common prefix and suffix are left untouched; only the differing
    /// middle is recorded. Returns `None` when the two are equal.
    pub fn between(before: &str, after: &str) -> Option<Self> {
        if before == after {
            return None;
        }

        let (b, a) = (before.as_bytes(), after.as_bytes());

        let mut prefix = b.iter().zip(a).take_while(|(x, y)| x == y).count();
        while !(before.is_char_boundary(prefix) && after.is_char_boundary(prefix)) {
            prefix -= 1;
        }

        let max_suffix = (b.len() - prefix).min(a.len() - prefix);
        let mut suffix = b
            .iter()
            .rev()
            .zip(a.iter().rev())
            .take(max_suffix)
            .take_while(|(x, y)| x == y)
            .count();
        while !(before.is_char_boundary(b.len() - suffix)
            && after.is_char_boundary(a.len() - suffix))
        {
            suffix -= 1;
        }

        let removed = &before[prefix..b.len() - suffix];
        let inserted = &after[prefix..a.len() - suffix];

        Some(if removed.is_empty() {
            Self::insert(prefix, inserted)
        } else if inserted.is_empty() {
            Self::delete(prefix, removed)
        } else {
            Self::replace(prefix, removed, inserted)
        })
    }

    pub fn kind(&self) -> EditKind {
        self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn removed_text(&self) -> &str {
        &self.removed_text
    }

    pub fn inserted_text(&self) -> &str {
        &self.inserted_text
    }

    /// Return new content with this edit performed.
    ///
    /// Fails with `OutOfBounds` if `position + len(removed_text)` runs past
    /// the end of `content`.
    pub fn apply(&self, content: &str) -> Result<String> {
        let mut out = content.to_string();
        self.apply_in_place(&mut out)?;
        Ok(out)
    }

    /// Return the content as it was before this edit, given content with
    /// the edit already applied.
    pub fn invert(&self, content: &str) -> Result<String> {
        let mut out = content.to_string();
        self.invert_in_place(&mut out)?;
        Ok(out)
    }

    /// Apply this edit to `content` without allocating a new string.
    ///
    /// On error `content` is left unchanged.
    pub fn apply_in_place(&self, content: &mut String) -> Result<()> {
        check_range(content, self.position, self.removed_text.len())?;
        let end = self.position + self.removed_text.len();
        content.replace_range(self.position..end, &self.inserted_text);
        Ok(())
    }

    /// Undo this edit on `content` without allocating a new string.
    ///
    /// On error `content` is left unchanged.
    pub fn invert_in_place(&self, content: &mut String) -> Result<()> {
        check_range(content, self.position, self.inserted_text.len())?;
        let end = self.position + self.inserted_text.len();
        content.replace_range(self.position..end, &self.removed_text);
        Ok(())
    }

    /// The edit that undoes this one when applied forward
    pub fn inverse(&self) -> Self {
        let kind = match self.kind {
            EditKind::Insert => EditKind::Delete,
            EditKind::Delete => EditKind::Insert,
            EditKind::Replace => EditKind::Replace,
        };
        Self {
            kind,
            position: self.position,
            removed_text: self.inserted_text.clone(),
            inserted_text: self.removed_text.clone(),
        }
    }

    /// Bytes this edit costs to keep: both texts plus fixed bookkeeping
    pub fn memory_usage(&self, overhead: usize) -> usize {
        self.removed_text.len() + self.inserted_text.len() + overhead
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] pos={}, old='{}', new='{}'",
            self.kind, self.position, self.removed_text, self.inserted_text
        )
    }
}
