//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments, programmatic seeding of bookmark
//! data, and CLI assertion helpers using `assert_cmd`.

mod bookmark;
mod command;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use bookmark::TestBookmark;
#[allow(unused_imports)]
pub use command::MarkCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
