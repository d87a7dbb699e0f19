//! Use-case services orchestrating repository operations.

pub mod note_service;
