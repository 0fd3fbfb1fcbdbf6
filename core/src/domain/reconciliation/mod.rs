pub mod entities;
pub mod flow;
pub mod services;

pub use entities::*;
pub use flow::{CookFlow, CookState, CookSummary};
pub use services::build_deduction_plan;
