//! Route handlers organized by resource

pub mod calcul;
pub mod health;
pub mod info;
pub mod sport;
