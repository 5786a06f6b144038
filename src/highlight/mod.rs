// 關鍵詞高亮主模組

mod compose;
mod matcher;

// 導出公開 API
pub use compose::{compose, highlighted, reconstruct, Segment};
pub use matcher::find_all_ignore_case;
