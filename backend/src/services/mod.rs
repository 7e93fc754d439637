//! Service layer for validation and orchestration.
//!
//! Services sit between the HTTP handlers and the repository. They borrow a
//! `&dyn FullRepository` and are cheap to build, so handlers construct one
//! per request. The action logic itself lives in [`actions`] as pure
//! functions.

pub mod actions;
pub mod animal;
pub mod category;
pub mod enclosure;
pub mod error;
pub(crate) mod validation;
pub mod zoo;

pub use actions::{AutoAssignPlan, ConstraintCheck, ConstraintReport};
pub use animal::AnimalService;
pub use category::CategoryService;
pub use enclosure::{EnclosureService, DEFAULT_ENCLOSURE_NAME};
pub use error::{ServiceError, ServiceResult};
pub use zoo::{Assignment, AutoAssignOutcome, ZooService};
