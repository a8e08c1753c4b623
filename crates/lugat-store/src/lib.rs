pub mod checkpoint;
pub mod sink;

pub use checkpoint::{CheckpointError, CheckpointStore, FileCheckpointStore};
pub use sink::{CardSink, RestCardSink, SinkError};
