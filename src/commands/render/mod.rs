mod charts;
mod run;
mod template;
#[cfg(test)]
mod tests;
mod values;

pub use run::{default_output_path, run, write_report};
