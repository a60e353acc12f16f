pub mod anisomap_errors;
pub mod constants;
pub mod map_file;
pub mod merge;
pub mod params;
pub mod paths;
pub mod reconcile;
pub mod selection;

pub use anisomap_errors::AnisomapError;
pub use merge::{merge_by_params, merge_maps, project_merge, MergeOutcome};
pub use paths::{InputPaths, OutputPaths};
pub use reconcile::ReconcileReport;
