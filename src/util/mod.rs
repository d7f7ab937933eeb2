pub mod error;
pub mod sysfs;
