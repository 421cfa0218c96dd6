//! Extract ingestion: delimited reading/writing and dataset discovery.

pub mod discovery;
pub mod error;
pub mod table_io;

pub use discovery::{
    CLEAN_SUFFIX, DiscoveredExtracts, discover_extracts, is_clean_output, list_extract_files,
    match_record_kind,
};
pub use error::{IngestError, Result};
pub use table_io::{
    DEFAULT_DELIMITER, ReadOptions, read_table, read_table_from_reader, write_table,
    write_table_to_writer,
};
