//! Worldloom engine library.
//!
//! Everything above the domain model lives here:
//!
//! - `store` - the in-memory world collection, mutation entry point, export/import
//! - `layout/` - pure geometry for the timeline, map, and relation graph views
//! - `image_editor` - crop/zoom rasterization for committed images
//! - `assistant/` - the AI writing collaborator (ports + Ollama adapter)
//! - `ports` / `clock` - infrastructure seams (LLM, time)

pub mod assistant;
pub mod clock;
pub mod export;
pub mod image_editor;
pub mod layout;
pub mod ports;
pub mod store;

pub use assistant::{Assistant, AssistantError, PromptTarget};
pub use clock::SystemClock;
pub use ports::{ClockPort, LlmPort};
pub use store::{BlockTarget, ExportFile, StoreError, WorldStore};
