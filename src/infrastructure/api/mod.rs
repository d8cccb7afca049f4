pub mod solver;

use std::sync::Arc;

use crate::domain::models::GatewayArc;

pub struct GatewayManager {}

impl GatewayManager {
    pub fn get() -> GatewayArc {
        return Arc::new(solver::SolverApi::default());
    }
}
