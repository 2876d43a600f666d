//! Rich menu model, layout templates, and the publish workflow.
//!
//! A menu moves through absent -> shell created -> content uploaded ->
//! default. Deletion is the only way back and always ends at absent.

pub mod draft;
pub mod model;
pub mod publish;
pub mod template;

pub use draft::{ActionBinding, DraftError, MenuDraft};
pub use model::{Action, Area, Bounds, RichMenu, Size};
pub use publish::{check_image, publish, PublishError, PublishOutcome, MAX_IMAGE_BYTES};
pub use template::{Template, TemplateView};
