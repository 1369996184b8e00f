pub mod service;

pub use service::{
    DashboardMetrics, DashboardScope, DashboardService, DepartmentStats, ProjectStatusStats,
    TaskStats,
};
