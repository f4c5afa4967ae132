//! Output of collected news for the outside world.
//!
//! - [`json`]: the daily `news_cache.json` snapshot read by the newsletter renderer
//!
//! ```text
//! snapshot_dir/
//! └── news_cache.json
//! ```

pub mod json;
