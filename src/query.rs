// Query pipeline over a cached repository listing.
// Filters by language and name, sorts by creation time, limits, and projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::Repository;

/// Parameters of the filtered view. Every field is optional.
///
/// Keys also bind in PascalCase and lowercase (`SortOrder`, `sortorder`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoQuery {
    /// Exact primary language, case-insensitive.
    #[serde(alias = "Language", alias = "LANGUAGE")]
    pub language: Option<String>,
    /// Substring of `full_name`, case-insensitive.
    #[serde(alias = "Name", alias = "NAME")]
    pub name: Option<String>,
    /// `desc` for newest first; anything else sorts oldest first.
    #[serde(alias = "SortOrder", alias = "sortorder", alias = "SORTORDER")]
    pub sort_order: Option<String>,
    /// Maximum results; zero or negative means unlimited.
    #[serde(alias = "Limit", alias = "LIMIT")]
    pub limit: Option<i64>,
}

/// Direction of the creation-time sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only a case-insensitive `desc` selects descending; unknown values fall back to ascending.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// Flattened repository shape returned by the filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub full_name: String,
    pub description: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub owner_avatar_url: String,
}

impl From<&Repository> for RepositorySummary {
    fn from(repo: &Repository) -> Self {
        Self {
            full_name: repo.full_name.clone(),
            description: repo.description.clone(),
            language: repo.language.clone(),
            created_at: repo.created_at,
            owner_avatar_url: repo.owner.avatar_url.clone(),
        }
    }
}

/// Run the full pipeline: language, name, sort, limit, project.
///
/// The order is fixed; limiting before sorting would keep the wrong records.
pub fn apply(records: &[Repository], query: &RepoQuery) -> Vec<RepositorySummary> {
    let selected: Vec<&Repository> = records.iter().collect();
    let selected = filter_by_language(selected, query.language.as_deref());
    let selected = filter_by_name(selected, query.name.as_deref());
    let selected = sort_by_created_at(selected, SortOrder::parse(query.sort_order.as_deref()));
    let selected = limit(selected, query.limit);
    project(&selected)
}

pub fn filter_by_language<'a>(
    records: Vec<&'a Repository>,
    language: Option<&str>,
) -> Vec<&'a Repository> {
    let Some(language) = language.filter(|l| !l.is_empty()) else {
        return records;
    };
    let wanted = language.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.language.to_lowercase() == wanted)
        .collect()
}

pub fn filter_by_name<'a>(
    records: Vec<&'a Repository>,
    name_part: Option<&str>,
) -> Vec<&'a Repository> {
    let Some(name_part) = name_part.filter(|n| !n.is_empty()) else {
        return records;
    };
    let needle = name_part.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.full_name.to_lowercase().contains(&needle))
        .collect()
}

/// Stable in both directions: equal timestamps keep their input order.
pub fn sort_by_created_at(mut records: Vec<&Repository>, order: SortOrder) -> Vec<&Repository> {
    match order {
        SortOrder::Asc => records.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Desc => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    records
}

pub fn limit(mut records: Vec<&Repository>, n: Option<i64>) -> Vec<&Repository> {
    if let Some(n) = n.and_then(|n| usize::try_from(n).ok()).filter(|&n| n > 0) {
        records.truncate(n);
    }
    records
}

pub fn project(records: &[&Repository]) -> Vec<RepositorySummary> {
    records.iter().map(|r| RepositorySummary::from(*r)).collect()
}
