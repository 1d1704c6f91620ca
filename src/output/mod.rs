pub mod html;
pub mod json;

pub use html::render_report;
pub use json::to_pretty_json;
