pub mod record;
pub mod seed;
pub mod store;

pub use record::{TemplateRecord, DESCRIPTION_HEADER};
pub use seed::{builtin_templates, SeedTemplate};
pub use store::{validate_template_name, TemplateStore};
