pub mod errors;
pub mod filters;
pub mod models;
pub mod notebook;
pub mod repo;
pub mod review;
pub mod scheduler;
pub mod stats;

pub use errors::*;
pub use filters::*;
pub use models::*;
pub use notebook::*;
pub use repo::*;
pub use review::*;
pub use scheduler::*;
pub use stats::*;
