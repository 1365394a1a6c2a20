pub mod keyword_screener;
pub mod traits;

pub use keyword_screener::KeywordScreener;
pub use traits::ContentScreener;
