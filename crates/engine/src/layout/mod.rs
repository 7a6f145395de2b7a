//! Pure layout computation over the domain model.
//!
//! Nothing in here draws. Each module turns a world's collections into
//! positioned geometry a view can render directly, keeping the coordinate
//! math testable without a canvas.

pub mod map_canvas;
pub mod relation_graph;
pub mod timeline;
