//! Storage abstractions for service layer
//!
//! Contains the file helper shared by stores that persist a whole document
//! as JSON on every write.

pub mod json_file;
