pub mod category;
pub mod course;
pub mod location;
