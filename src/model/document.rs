//! The live text buffer under edit
//!
//! A [`Document`] keeps no history of its own. Every mutation returns the
//! [`Edit`] it performed so whoever owns the history can record it.

use super::edit::Edit;
use crate::error::{check_range, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    content: String,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Insert `text` at byte offset `position`.
    ///
    /// `position == len()` appends.
    pub fn insert(&mut self, position: usize, text: &str) -> Result<Edit> {
        check_range(&self.content, position, 0)?;
        if position == self.content.len() {
            self.content.push_str(text);
        } else {
            self.content.insert_str(position, text);
        }
        Ok(Edit::insert(position, text))
    }

    /// Remove `length` bytes starting at `position`
    pub fn delete(&mut self, position: usize, length: usize) -> Result<Edit> {
        check_range(&self.content, position, length)?;
        let removed: String = self.content.drain(position..position + length).collect();
        Ok(Edit::delete(position, removed))
    }

    /// Replace `length` bytes at `position` with `text`
    pub fn replace(&mut self, position: usize, length: usize, text: &str) -> Result<Edit> {
        check_range(&self.content, position, length)?;
        let removed = self.content[position..position + length].to_string();
        self.content.replace_range(position..position + length, text);
        Ok(Edit::replace(position, removed, text))
    }

    /// Perform an already-built edit on the buffer
    pub fn apply_edit(&mut self, edit: &Edit) -> Result<()> {
        edit.apply_in_place(&mut self.content)
    }

    /// A copy of the current content
    pub fn content(&self) -> String {
        self.content.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
