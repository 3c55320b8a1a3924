pub mod csv_input;
pub mod csv_output;

pub use csv_input::{IngestOptions, read_customer_csv};
pub use csv_output::write_customer_csv;
