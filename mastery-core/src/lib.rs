pub mod errors;
pub mod filters;
pub mod forms;
pub mod models;
pub mod order;
pub mod picker;
pub mod repo;
pub mod store;
pub mod study;

pub use errors::*;
pub use filters::*;
pub use forms::*;
pub use models::*;
pub use picker::*;
pub use repo::*;
pub use store::*;
pub use study::*;
