//! Domain model module declarations.

pub mod decision;
pub mod event;
