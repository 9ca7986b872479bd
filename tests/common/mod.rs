pub mod tracing;

/// Reference implementation of a positional splice on plain strings
pub fn splice(content: &str, position: usize, remove: usize, insert: &str) -> String {
    format!(
        "{}{}{}",
        &content[..position],
        insert,
        &content[position + remove..]
    )
}
