//! Resource declarations

pub mod calcul;
pub mod sport;

pub use calcul::{Calcul, CalculRequest, CalculResponse};
pub use sport::{Sport, SportCreate, SportTable};
