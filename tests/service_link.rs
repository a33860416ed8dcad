use linkbase::application::services::LinkService;
use linkbase::domain::entities::{OwnerId, PageRequest, Requester};
use linkbase::domain::repositories::LinkRepository;
use linkbase::error::AppError;
use linkbase::infrastructure::memory::InMemoryLinkRepository;
use linkbase::utils::base62;
use std::sync::Arc;

fn service() -> (Arc<LinkService<InMemoryLinkRepository>>, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let service = Arc::new(LinkService::new(repo.clone(), "http://s.test"));
    (service, repo)
}

#[tokio::test]
async fn test_resolve_returns_created_url() {
    let (service, _) = service();

    let link = service
        .create("https://example.com/a?b=c", &Requester::Anonymous)
        .await
        .unwrap();
    let resolved = service.resolve(&link.short_code).await.unwrap();

    assert_eq!(resolved.original_url, "https://example.com/a?b=c");
    assert_eq!(base62::decode(&link.short_code).unwrap(), link.id);
}

#[tokio::test]
async fn test_first_link_gets_code_one_and_counts_clicks() {
    let (service, repo) = service();

    let link = service
        .create("https://example.com", &Requester::Anonymous)
        .await
        .unwrap();
    assert_eq!(link.id, 1);
    assert_eq!(link.short_code, "1");

    service.resolve("1").await.unwrap();
    let second = service.resolve("1").await.unwrap();

    assert_eq!(second.clicks, 2);
    assert_eq!(repo.find_by_code("1").await.unwrap().unwrap().clicks, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_lose_no_clicks() {
    let (service, repo) = service();
    let link = service
        .create("https://example.com", &Requester::Anonymous)
        .await
        .unwrap();

    let tasks: Vec<_> = (0..200)
        .map(|_| {
            let service = service.clone();
            let code = link.short_code.clone();
            tokio::spawn(async move { service.resolve(&code).await.is_ok() })
        })
        .collect();

    let mut successes = 0;
    for task in tasks {
        if task.await.unwrap() {
            successes += 1;
        }
    }

    let stored = repo.find_by_code(&link.short_code).await.unwrap().unwrap();
    assert_eq!(successes, 200);
    assert_eq!(stored.clicks, successes);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_codes() {
    let (service, _) = service();

    let tasks: Vec<_> = (0..100)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create(&format!("https://example.com/{i}"), &Requester::Anonymous)
                    .await
                    .unwrap()
                    .short_code
            })
        })
        .collect();

    let mut codes = Vec::new();
    for task in tasks {
        codes.push(task.await.unwrap());
    }
    codes.sort();
    codes.dedup();

    assert_eq!(codes.len(), 100);
}

#[tokio::test]
async fn test_non_owner_update_leaves_url_unchanged() {
    let (service, repo) = service();
    let owner = Requester::Owner(OwnerId::new(1));
    let link = service.create("https://mine.example", &owner).await.unwrap();

    let err = service
        .update(
            link.id,
            "https://theirs.example",
            &Requester::Owner(OwnerId::new(2)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden { .. }));
    let stored = repo.find_by_id(link.id).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://mine.example");
}

#[tokio::test]
async fn test_delete_then_resolve_is_not_found() {
    let (service, _) = service();
    let owner = Requester::Owner(OwnerId::new(1));
    let link = service.create("https://example.com", &owner).await.unwrap();

    service.delete(link.id, &owner).await.unwrap();

    let err = service.resolve(&link.short_code).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let (service, _) = service();
    let owner = Requester::Owner(OwnerId::new(1));

    let first = service.create("https://example.com/1", &owner).await.unwrap();
    service.delete(first.id, &owner).await.unwrap();
    let second = service.create("https://example.com/2", &owner).await.unwrap();

    assert_ne!(first.short_code, second.short_code);
}

#[tokio::test]
async fn test_list_blank_search_is_ignored() {
    let (service, _) = service();
    let owner = Requester::Owner(OwnerId::new(9));
    service.create("https://a.example", &owner).await.unwrap();
    service.create("https://b.example", &owner).await.unwrap();

    let page = service
        .list(OwnerId::new(9), Some("   "), PageRequest::new(1, 15))
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.items.len(), 2);
}
