//! Dashboard DTOs

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::application::dashboard::{
    DashboardMetrics, DepartmentStats, ProjectStatusStats, TaskStats,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardMetricsDto {
    pub total_interns: u64,
    pub active_projects: u64,
    pub completed_tasks: u64,
    pub success_rate: f64,
}

impl From<DashboardMetrics> for DashboardMetricsDto {
    fn from(m: DashboardMetrics) -> Self {
        Self {
            total_interns: m.total_interns,
            active_projects: m.active_projects,
            completed_tasks: m.completed_tasks,
            success_rate: m.success_rate,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentStatsDto {
    pub department: String,
    pub intern_count: u64,
    pub project_count: u64,
}

impl From<DepartmentStats> for DepartmentStatsDto {
    fn from(s: DepartmentStats) -> Self {
        Self {
            department: s.department,
            intern_count: s.intern_count,
            project_count: s.project_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectStatusStatsDto {
    pub todo_count: u64,
    pub in_progress_count: u64,
    pub done_count: u64,
}

impl From<ProjectStatusStats> for ProjectStatusStatsDto {
    fn from(s: ProjectStatusStats) -> Self {
        Self {
            todo_count: s.todo_count,
            in_progress_count: s.in_progress_count,
            done_count: s.done_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskStatsDto {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub pending_tasks: u64,
    pub overdue_tasks: u64,
    pub tasks_by_priority: HashMap<String, u64>,
}

impl From<TaskStats> for TaskStatsDto {
    fn from(s: TaskStats) -> Self {
        Self {
            total_tasks: s.total_tasks,
            completed_tasks: s.completed_tasks,
            pending_tasks: s.pending_tasks,
            overdue_tasks: s.overdue_tasks,
            tasks_by_priority: s.tasks_by_priority,
        }
    }
}
