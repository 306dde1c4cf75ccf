//! Product of two numbers, served by `POST /calcul`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calcul {
    pub first_number: f64,
    pub second_number: f64,
}

impl Calcul {
    pub fn new(first_number: f64, second_number: f64) -> Self {
        Self {
            first_number,
            second_number,
        }
    }

    pub fn product(&self) -> f64 {
        self.first_number * self.second_number
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CalculRequest {
    pub nb1: f64,
    pub nb2: f64,
}

impl From<CalculRequest> for Calcul {
    fn from(req: CalculRequest) -> Self {
        Self::new(req.nb1, req.nb2)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CalculResponse {
    pub result: f64,
}
