//! Input loading for the hiring statistics tools: candidate rows exported
//! from the spreadsheet upload and round configuration files.

pub mod error;
pub mod fingerprint;
pub mod round_config;
pub mod row_table;

pub use error::{IngestError, Result};
pub use fingerprint::fingerprint_rows;
pub use round_config::{RoundConfig, load_round_config};
pub use row_table::{RowTable, read_csv_rows, read_json_rows, read_rows};
