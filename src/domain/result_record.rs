use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectRecord {
    pub code: String,
    pub subject: String,
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub name: String,
    pub gpa: String,
    pub result: String,
    pub subjects: Vec<SubjectRecord>,
}
