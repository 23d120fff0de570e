use serde::Deserialize;

/// One page of `GET /vacancies`. Only the fields the relay reads are decoded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VacanciesPage {
    /// Matching vacancies.
    #[serde(default)]
    pub items: Vec<Vacancy>,
    /// Total number of matches across pages.
    #[serde(default)]
    pub found: u64,
}

/// A vacancy as returned by the search API. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Vacancy {
    /// Vacancy id; also the dedup key.
    pub id: String,
    /// Vacancy title.
    #[serde(default)]
    pub name: String,
    /// Experience bucket reported by the API, if any.
    #[serde(default)]
    pub experience: Option<VacancyExperience>,
}

/// `experience` object of a vacancy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VacancyExperience {
    /// Bucket id (e.g. `between1And3`).
    pub id: String,
    /// Localized bucket name.
    #[serde(default)]
    pub name: String,
}

impl Vacancy {
    /// Public page of this vacancy.
    pub fn url(&self) -> String {
        format!("https://hh.ru/vacancy/{}", self.id)
    }
}
