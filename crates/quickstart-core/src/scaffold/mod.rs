//! Project scaffolding: answers, layout, package catalog and the steps that
//! apply them to a freshly created project

pub mod answers;
pub mod catalog;
pub mod layout;
pub mod project;

pub use answers::{validate_project_name, AnswersFile, UserAnswers};
pub use catalog::{Catalog, CatalogEntry, FLUTTER_PACKAGES};
pub use layout::CLEAN_ARCHITECTURE;
pub use project::Scaffolder;
