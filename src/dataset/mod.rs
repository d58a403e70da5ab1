//! Telemetry dataset handling: on-disk frame files and in-memory tables.

pub mod frames;
pub mod readers;
pub mod table;

pub use frames::{
    DatasetMetadata, FieldValue, FrameField, TelemetryDataset, TelemetryFrame,
    DATA_FORMAT_VERSION,
};
pub use readers::{load_table, load_table_with_delimiter, table_from_csv, table_from_dataset};
pub use table::{ChannelSeries, PredictorTable, TelemetryTable};
