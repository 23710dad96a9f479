use thiserror::Error;

use crate::model::question::{Question, QuestionError};
use crate::model::subject::{SubjectId, SubjectIdError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("subject {0} is defined twice")]
    DuplicateSubject(SubjectId),

    #[error(transparent)]
    Subject(#[from] SubjectIdError),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Ordered, read-only mapping from subject to its question list.
///
/// Subjects keep insertion order so the selection screen is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectCatalog {
    subjects: Vec<(SubjectId, Vec<Question>)>,
}

impl SubjectCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subject with its questions.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateSubject` if the id is already present.
    pub fn with_subject(
        mut self,
        id: SubjectId,
        questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        if self.contains(&id) {
            return Err(CatalogError::DuplicateSubject(id));
        }
        self.subjects.push((id, questions));
        Ok(self)
    }

    /// The hard-coded question bank shipped with the app.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if any builtin entry fails validation.
    pub fn builtin() -> Result<Self, CatalogError> {
        let web = vec![
            Question::new(
                "What does HTML stand for?",
                [
                    "Hyper Text Markup Language",
                    "High Tech Multi Language",
                    "Hyper Transfer Markup Language",
                    "Home Tool Markup Language",
                ],
                "Hyper Text Markup Language",
            )?,
            Question::new(
                "Which language is used to style web pages?",
                ["CSS", "HTML", "XML", "SQL"],
                "CSS",
            )?,
            Question::new(
                "Which HTML element creates a hyperlink?",
                ["<a>", "<link>", "<href>", "<url>"],
                "<a>",
            )?,
            Question::new(
                "Which HTTP status code means \"Not Found\"?",
                ["404", "200", "301", "500"],
                "404",
            )?,
            Question::new(
                "Which method adds an element to the end of a JavaScript array?",
                ["push()", "pop()", "shift()", "concat()"],
                "push()",
            )?,
        ];

        let android = vec![
            Question::new(
                "What programming language is primarily used for Android app development?",
                ["Java", "Swift", "C#", "Python"],
                "Java",
            )?,
            Question::new(
                "Which file declares an Android app's components and permissions?",
                [
                    "AndroidManifest.xml",
                    "build.gradle",
                    "strings.xml",
                    "MainActivity.java",
                ],
                "AndroidManifest.xml",
            )?,
            Question::new(
                "Which component represents a single screen with a user interface?",
                ["Activity", "Service", "BroadcastReceiver", "ContentProvider"],
                "Activity",
            )?,
            Question::new(
                "Which build system does Android Studio use by default?",
                ["Gradle", "Maven", "Ant", "Make"],
                "Gradle",
            )?,
        ];

        let cloud = vec![
            Question::new(
                "Which cloud service model provides virtual machines and networks?",
                ["IaaS", "SaaS", "PaaS", "FaaS"],
                "IaaS",
            )?,
            Question::new(
                "What does \"elasticity\" mean in cloud computing?",
                [
                    "Scaling resources up and down with demand",
                    "Replicating data across regions",
                    "Encrypting data at rest",
                    "Billing per user seat",
                ],
                "Scaling resources up and down with demand",
            )?,
            Question::new(
                "Which technology packages an application with its dependencies?",
                ["Containers", "Hypervisors", "Load balancers", "CDNs"],
                "Containers",
            )?,
        ];

        Self::new()
            .with_subject(SubjectId::new("web-development")?, web)?
            .with_subject(SubjectId::new("android-development")?, android)?
            .with_subject(SubjectId::new("cloud-computing")?, cloud)
    }

    #[must_use]
    pub fn contains(&self, id: &SubjectId) -> bool {
        self.subjects.iter().any(|(existing, _)| existing == id)
    }

    /// Subject ids in display order.
    pub fn subject_ids(&self) -> impl Iterator<Item = &SubjectId> {
        self.subjects.iter().map(|(id, _)| id)
    }

    /// Questions for a subject, or `None` if the subject is unknown.
    #[must_use]
    pub fn questions(&self, id: &SubjectId) -> Option<&[Question]> {
        self.subjects
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, questions)| questions.as_slice())
    }

    /// Number of questions for a subject; unknown subjects count as empty.
    #[must_use]
    pub fn total_questions(&self, id: &SubjectId) -> usize {
        self.questions(id).map_or(0, <[Question]>::len)
    }

    #[must_use]
    pub fn question(&self, id: &SubjectId, index: usize) -> Option<&Question> {
        self.questions(id).and_then(|questions| questions.get(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}
