pub mod writer;

pub use writer::write_metrics_to_xlsx;
