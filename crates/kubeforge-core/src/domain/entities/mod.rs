pub mod common;
pub mod context;
pub mod resource;
pub mod template;
pub mod wiring;

pub use crate::domain::DomainError;
pub use context::TemplateContext;
pub use resource::ResourceIdentity;
pub use template::TemplateBody;
