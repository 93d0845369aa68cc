// Inventory records
pub mod inspections;
pub mod items;
pub mod vendors;

// Derived views
pub mod analytics;

// Item tagging and reporting
pub mod qr;
pub mod summary;
