use crate::error::Error as SnooErr;
pub type Result<T> = std::result::Result<T, SnooErr>;
