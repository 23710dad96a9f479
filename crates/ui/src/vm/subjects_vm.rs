use quiz_core::model::{SubjectCatalog, SubjectId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectCardVm {
    pub id: SubjectId,
    pub label: String,
    pub question_count: usize,
}

#[must_use]
pub fn map_subjects(catalog: &SubjectCatalog) -> Vec<SubjectCardVm> {
    catalog
        .subject_ids()
        .map(|id| SubjectCardVm {
            id: id.clone(),
            label: id.label(),
            question_count: catalog.total_questions(id),
        })
        .collect()
}
