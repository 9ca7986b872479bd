//! Process-level services used by the reporting binary

pub mod tracing_setup;
