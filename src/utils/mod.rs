// Utility modules: graph storage, configuration loading, geometry helpers and rendering

pub mod distance;
pub mod graph;
pub mod init_map;
pub mod render;
