pub mod report;

pub use report::{hyperlink, render_failures, render_reports, render_repository};
