pub mod inspection;
pub mod item;
pub mod vendor;
