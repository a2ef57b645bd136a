//! Matchday engine: store access and the running refresh pipeline.
mod error;
mod memory;
mod observer;
mod pipeline;
mod store;

pub use error::{PipelineError, StoreError, StoreFailure};
pub use memory::{MemoryStore, MemoryStoreSettings};
pub use observer::{ChannelObserver, PipelineObserver, PipelineOutputs};
pub use pipeline::{PipelineHandle, PipelineSettings};
pub use store::Store;
