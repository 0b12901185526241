pub mod input;
pub mod result;
pub mod typing;

pub use input::CharStatus;
pub use result::TypingStats;
pub use typing::TypingSession;
