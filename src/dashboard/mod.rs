//! Domain, todo and fault records the dashboard keeps in the document store.

pub mod backup;
pub mod domains;
pub mod optimistic;
pub mod records;
pub mod todos;

pub use domains::{normalize_projects, project_stats, ProjectStats};
pub use optimistic::OptimisticList;
pub use records::{DomainRecord, DomainStatus, FaultRecord, Project, Record, TodoRecord};
pub use todos::{group_todos, has_open_todos, sort_todos, GENERAL_TASKS_KEY};
