//! CLI-facing sub-programs: thin glue between [`crate::args`] (parsing and
//! validation) and [`crate::extend`] (the actual extension core).

pub mod extend_clusters;

pub use extend_clusters::extend_clusters_process;
