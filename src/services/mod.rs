//! Service layer
//!
//! - `validator`: field-group validation of a draft
//! - `normalizer`: draft → wire payload
//! - `editor`: editor session and submission orchestration

pub mod editor;
pub mod normalizer;
pub mod validator;

pub use editor::{EditorSession, LinkEditor, SubmitError, SubmitOutcome, SubmitPhase};
pub use normalizer::normalize;
pub use validator::{Advisory, FieldGroup, ValidationErrors, advisories, messages, validate};
