pub mod ctc;
pub mod devman;
pub mod docker;

pub use ctc::check_dependencies;
pub use devman::{check_keywords, KeywordSet};
pub use docker::check_dockerfile;
