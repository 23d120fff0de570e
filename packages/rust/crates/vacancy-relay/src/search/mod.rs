//! Vacancy search: the searcher capability and the hh.ru client behind it.

mod hh_client;
mod searcher;
mod types;

pub use hh_client::{HhClient, HhClientConfig};
pub use searcher::VacancySearcher;
pub use types::{VacanciesPage, Vacancy, VacancyExperience};
