//! Platform abstraction layer
//!
//! The simulation never touches the outside world. Hosts plug in:
//! - Input (held keys sampled once per tick)
//! - Storage (key-value strings; LocalStorage on web, a JSON file natively)
//! - UI reporting and rendering

pub mod input;
pub mod storage;
pub mod ui;

pub use input::{InputSource, KeyState};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
pub use ui::{LogReporter, NullRenderer, Renderer, UiReporter};
