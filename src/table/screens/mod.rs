//! Screen implementations for each phase of the table.

mod discussion;
mod reveal;
mod setup;

pub use discussion::DiscussionScreen;
pub use reveal::RevealScreen;
pub use setup::{Focus, InputMode, SetupScreen};
