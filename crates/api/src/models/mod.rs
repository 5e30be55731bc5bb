pub mod operation;
pub mod resource;

pub use operation::*;
pub use resource::*;
