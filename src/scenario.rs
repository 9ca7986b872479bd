//! Scripted edit sequences for comparing history strategies
//!
//! Both scenarios drive an [`EditSession`] and take a checkpoint after
//! every change, which is the worst case for a full-copy history.

use crate::config::Config;
use crate::error::Result;
use crate::model::session::EditSession;

/// Generate a source file of `lines` small class definitions
pub fn generate_large_code(lines: usize) -> String {
    let mut code = String::new();
    for i in 0..lines {
        code.push_str(&format!("public class Line{i} {{\n"));
        code.push_str(&format!("    private int value = {i};\n"));
        code.push_str("    public int getValue() { return value; }\n");
        code.push_str("}\n\n");
    }
    code
}

/// "Hello" grows to "Hello World!" in two appends
pub fn greeting(config: &Config) -> Result<EditSession> {
    let mut session = EditSession::with_config("Hello", &config.history);
    for text in [" World", "!"] {
        session.append(text)?;
        session.checkpoint();
    }
    Ok(session)
}

/// A large generated file receiving one small comment per commit
pub fn large_file(config: &Config) -> Result<EditSession> {
    let base = generate_large_code(config.scenario.large_file_lines);
    tracing::info!(
        "scenario: large file with {} lines ({} bytes), {} commits",
        config.scenario.large_file_lines,
        base.len(),
        config.scenario.commits
    );

    let mut session = EditSession::with_config(base, &config.history);
    for i in 1..=config.scenario.commits {
        session.append(&format!("// Change {i} added\n"))?;
        session.checkpoint();
    }
    Ok(session)
}
