use serde::{Deserialize, Serialize};

use crate::spellcheck::models::{SpellCheckError, StageStatus};

/// Resume form as submitted by the UI. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeFormData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub visa_type: String,
    pub education: String,
    pub experience: String,
    pub skills: String,
    pub languages: String,
    pub introduction: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResumeSection {
    Name,
    Email,
    Phone,
    Nationality,
    VisaType,
    Education,
    Experience,
    Skills,
    Languages,
    Introduction,
}

/// How a section's text is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Counted, never checked.
    Identity,
    EmailAddress,
    PhoneNumber,
    Prose,
}

impl ResumeSection {
    pub fn label(&self) -> &'static str {
        match self {
            ResumeSection::Name => "name",
            ResumeSection::Email => "email",
            ResumeSection::Phone => "phone",
            ResumeSection::Nationality => "nationality",
            ResumeSection::VisaType => "visaType",
            ResumeSection::Education => "education",
            ResumeSection::Experience => "experience",
            ResumeSection::Skills => "skills",
            ResumeSection::Languages => "languages",
            ResumeSection::Introduction => "introduction",
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            ResumeSection::Name => SectionKind::Identity,
            ResumeSection::Email => SectionKind::EmailAddress,
            ResumeSection::Phone => SectionKind::PhoneNumber,
            _ => SectionKind::Prose,
        }
    }
}

impl ResumeFormData {
    /// Non-empty sections in form order.
    pub fn sections(&self) -> Vec<(ResumeSection, &str)> {
        [
            (ResumeSection::Name, &self.name),
            (ResumeSection::Email, &self.email),
            (ResumeSection::Phone, &self.phone),
            (ResumeSection::Nationality, &self.nationality),
            (ResumeSection::VisaType, &self.visa_type),
            (ResumeSection::Education, &self.education),
            (ResumeSection::Experience, &self.experience),
            (ResumeSection::Skills, &self.skills),
            (ResumeSection::Languages, &self.languages),
            (ResumeSection::Introduction, &self.introduction),
        ]
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(section, text)| (section, text.as_str()))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCheck {
    pub section: ResumeSection,
    pub errors: Vec<SpellCheckError>,
    pub word_count: usize,
    pub error_count: usize,
    pub general_check: StageStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeCheckResult {
    pub sections: Vec<SectionCheck>,
    pub total_words: usize,
    pub total_errors: usize,
    pub accuracy: f64,
}
