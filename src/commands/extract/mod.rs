mod parser;
mod run;
mod sections;

pub use run::{extract_report, run};
pub(crate) use run::report_path;
