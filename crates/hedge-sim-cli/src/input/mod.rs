pub mod file;
pub mod params;
pub mod stdin;
