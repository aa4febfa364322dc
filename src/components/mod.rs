//! Browser-side driver: canvas rendering and input for the layout engine.

pub mod force_graph;
