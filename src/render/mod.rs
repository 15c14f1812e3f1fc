pub mod scene;
pub mod snapshot;
