// Query service over the shared repository cache.
// Composes cache lookup with the query pipeline for the two public views.

use std::sync::Arc;

use crate::cache::CacheManager;
use crate::error::ServiceError;
use crate::github::Repository;
use crate::query::{self, RepoQuery, RepositorySummary};

/// Entry point used by the HTTP layer. Cloning shares the same cache.
#[derive(Clone)]
pub struct RepoService {
    cache: Arc<CacheManager>,
}

impl RepoService {
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Every cached repository in upstream order, full shape.
    pub async fn list_all(&self) -> Result<Vec<Repository>, ServiceError> {
        let snapshot = self.cache.get_current_data().await?;
        Ok(snapshot.records().to_vec())
    }

    /// Filtered, sorted, limited and flattened view.
    pub async fn filter(&self, query: &RepoQuery) -> Result<Vec<RepositorySummary>, ServiceError> {
        let snapshot = self.cache.get_current_data().await?;
        Ok(query::apply(snapshot.records(), query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStore, UpstreamFetcher};
    use crate::error::{FetchError, Result as FetchResult};
    use crate::github::Owner;
    use async_trait::async_trait;

    struct FixedFetcher(Option<Vec<Repository>>);

    #[async_trait]
    impl UpstreamFetcher for FixedFetcher {
        async fn fetch(&self) -> FetchResult<Vec<Repository>> {
            self.0.clone().ok_or(FetchError::Unauthorized)
        }
    }

    fn repo(name: &str, language: &str, created_at: &str) -> Repository {
        Repository {
            full_name: name.to_string(),
            description: String::new(),
            language: language.to_string(),
            owner: Owner {
                avatar_url: "https://avatars.example/org".to_string(),
            },
            created_at: created_at.parse().unwrap(),
        }
    }

    fn service(records: Option<Vec<Repository>>) -> RepoService {
        let cache = CacheManager::new(CacheStore::default(), Arc::new(FixedFetcher(records)));
        RepoService::new(Arc::new(cache))
    }

    #[tokio::test]
    async fn test_list_all_keeps_upstream_order() {
        let svc = service(Some(vec![
            repo("org/z", "Go", "2022-01-01T00:00:00Z"),
            repo("org/a", "Go", "2018-01-01T00:00:00Z"),
        ]));

        let all = svc.list_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["org/z", "org/a"]);
    }

    #[tokio::test]
    async fn test_filter_runs_pipeline() {
        let svc = service(Some(vec![
            repo("org/a", "Go", "2020-01-01T00:00:00Z"),
            repo("org/b", "Go", "2019-01-01T00:00:00Z"),
            repo("org/c", "Rust", "2021-01-01T00:00:00Z"),
        ]));
        let query = RepoQuery {
            language: Some("Go".to_string()),
            sort_order: Some("desc".to_string()),
            limit: Some(1),
            ..RepoQuery::default()
        };

        let result = svc.filter(&query).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].full_name, "org/a");
    }

    #[tokio::test]
    async fn test_cold_failure_is_unavailable_not_empty() {
        let svc = service(None);
        assert!(matches!(
            svc.list_all().await,
            Err(ServiceError::Unavailable { .. })
        ));
        assert!(matches!(
            svc.filter(&RepoQuery::default()).await,
            Err(ServiceError::Unavailable { .. })
        ));
    }
}
