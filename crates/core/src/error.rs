use thiserror::Error;

use crate::model::{CatalogError, QuestionError, SubjectIdError};
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Subject(#[from] SubjectIdError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
