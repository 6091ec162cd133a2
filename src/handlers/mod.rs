pub mod attempt_handler;
pub mod dashboard_handler;
pub mod health_handler;

pub use attempt_handler::{revision_set, score_attempt};
pub use dashboard_handler::{dashboard_material, dashboard_overview, dashboard_user};
pub use health_handler::{health_check, health_check_live, health_check_ready};
