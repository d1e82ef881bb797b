//! Navigation guard and route classification.

pub mod guard;
pub mod routes;
