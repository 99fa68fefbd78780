//! Backend data types.
//!
//! Field names follow the backend's camelCase JSON; timestamps are kept as
//! the ISO-8601 strings the backend sends.

mod project;
mod user;

pub use project::{
    NewProject, Project, ProjectFile, ProjectSigner, ProjectStatus, ProjectSummary, ProjectType,
    ProjectWithRelations, QrCode, QrFormat, SignatureStatus,
};
pub(crate) use user::SessionEnvelope;
pub use user::{NewUser, RoleCounts, SessionUser, User, UserCount, UserPosition, UserRole};
