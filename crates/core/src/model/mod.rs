mod catalog;
mod identity;
mod question;
mod subject;

pub use catalog::{CatalogError, SubjectCatalog};
pub use identity::{AUTH_PASSPHRASE, CredentialError, Identity};
pub use question::{OPTION_COUNT, Question, QuestionError};
pub use subject::{SubjectId, SubjectIdError};
