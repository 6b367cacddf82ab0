// Copyright 2025 Cowboy AI, LLC.

//! Unit-of-Work integration tests
//!
//! ```mermaid
//! graph LR
//!     S[start] --> W[writes through resolved repositories]
//!     W --> C{outcome}
//!     C -->|commit| V[visible to fresh readers]
//!     C -->|rollback| N[nothing visible]
//! ```

use pretty_assertions::assert_eq;
use std::sync::Arc;

use catalog_domain::category::{CategoryRepository, CategoryStoreRepository};
use catalog_domain::genre::GenreRepository;
use catalog_domain::persistence::RepositoryName;
use catalog_domain::{
    Category, CategoryId, CategoryProps, DomainError, Entity, Genre, GenreProps, InMemoryCatalog,
    InMemoryUnitOfWork, Repository, RepositoryContainer, Store, StoreUnitOfWork, UnitOfWork,
    UnitOfWorkState,
};

fn store_uow() -> StoreUnitOfWork {
    StoreUnitOfWork::for_catalog(Arc::new(Store::default()))
}

fn category(name: &str) -> Category {
    Category::create(CategoryProps::new(name)).unwrap()
}

async fn committed(uow: &StoreUnitOfWork, id: &str) -> bool {
    let reader = CategoryStoreRepository::unbound(uow.store().clone());
    reader.find_by_id(id).await.is_ok()
}

#[tokio::test]
async fn test_commit_or_rollback_before_start_fails() {
    let uow = store_uow();
    assert_eq!(uow.commit().await.unwrap_err(), DomainError::NoTransaction);
    assert_eq!(uow.rollback().await.unwrap_err(), DomainError::NoTransaction);

    let uow = InMemoryUnitOfWork::new(Arc::new(RepositoryContainer::new()));
    assert_eq!(
        uow.commit().await.unwrap_err().to_string(),
        "No transaction started"
    );
    assert_eq!(
        uow.rollback().await.unwrap_err().to_string(),
        "No transaction started"
    );
}

#[tokio::test]
async fn test_store_repository_requires_active_transaction() {
    let uow = store_uow();
    let err = uow
        .get_repository::<dyn CategoryRepository>()
        .await
        .err()
        .unwrap();
    assert_eq!(err, DomainError::NoTransaction);

    uow.start().await.unwrap();
    assert!(uow.get_repository::<dyn CategoryRepository>().await.is_ok());
    assert!(uow.transaction().await.is_some());
    uow.commit().await.unwrap();
    assert!(uow.transaction().await.is_none());
}

#[tokio::test]
async fn test_start_is_idempotent() {
    let uow = store_uow();
    uow.start().await.unwrap();
    let first = uow.transaction().await.unwrap().id();
    uow.start().await.unwrap();
    assert_eq!(uow.transaction().await.unwrap().id(), first);
    assert_eq!(uow.state().await, UnitOfWorkState::Active);

    uow.commit().await.unwrap();
    assert_eq!(uow.state().await, UnitOfWorkState::Idle);
}

#[tokio::test]
async fn test_writes_are_visible_inside_and_published_on_commit() {
    let uow = store_uow();
    let movie = category("Movie");

    uow.start().await.unwrap();
    let repo = uow.get_repository::<dyn CategoryRepository>().await.unwrap();
    repo.insert(&movie).await.unwrap();

    assert_eq!(repo.find_by_id(movie.id()).await.unwrap(), movie);
    assert!(!committed(&uow, movie.id()).await);

    uow.commit().await.unwrap();
    assert!(committed(&uow, movie.id()).await);

    // the same instance keeps working in auto-commit mode
    repo.delete(movie.id()).await.unwrap();
    assert!(!committed(&uow, movie.id()).await);
}

#[tokio::test]
async fn test_rollback_discards_writes_of_every_repository() {
    let uow = store_uow();
    let movie = category("Movie");
    let action = Genre::create(GenreProps::new("Action", vec![movie.entity_id().clone()])).unwrap();

    uow.start().await.unwrap();
    let categories = uow.get_repository::<dyn CategoryRepository>().await.unwrap();
    let genres = uow.get_repository::<dyn GenreRepository>().await.unwrap();
    categories.insert(&movie).await.unwrap();
    genres.insert(&action).await.unwrap();
    uow.rollback().await.unwrap();

    assert!(categories.find_all().await.unwrap().is_empty());
    assert!(genres.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_run_commits_on_success() {
    let uow = store_uow();
    let movie = category("Movie");
    let id = movie.id().to_string();

    let inserted = uow
        .run(move |uow| {
            Box::pin(async move {
                let repo = uow.get_repository::<dyn CategoryRepository>().await?;
                repo.insert(&movie).await?;
                Ok::<_, DomainError>(movie)
            })
        })
        .await
        .unwrap();

    assert_eq!(inserted.id(), id);
    assert_eq!(uow.state().await, UnitOfWorkState::Idle);
    assert!(committed(&uow, &id).await);
}

#[tokio::test]
async fn test_run_rolls_back_and_returns_the_original_error() {
    let uow = store_uow();
    let movie = category("Movie");
    let id = movie.id().to_string();

    let err = uow
        .run(move |uow| {
            Box::pin(async move {
                let repo = uow.get_repository::<dyn CategoryRepository>().await?;
                repo.insert(&movie).await?;
                Err::<(), _>(DomainError::Storage("disk full".to_string()))
            })
        })
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::Storage("disk full".to_string()));
    assert_eq!(uow.state().await, UnitOfWorkState::Idle);
    assert!(!committed(&uow, &id).await);
}

#[tokio::test]
async fn test_run_inside_explicit_transaction_joins_it() {
    let uow = store_uow();
    let movie = category("Movie");
    let id = movie.id().to_string();

    uow.start().await.unwrap();
    let outer = uow.transaction().await.unwrap().id();

    uow.run(move |uow| {
        Box::pin(async move {
            let repo = uow.get_repository::<dyn CategoryRepository>().await?;
            repo.insert(&movie).await
        })
    })
    .await
    .unwrap();

    // nothing committed by the inner run, the outer transaction is still live
    assert_eq!(uow.state().await, UnitOfWorkState::Active);
    assert_eq!(uow.transaction().await.unwrap().id(), outer);
    assert!(!committed(&uow, &id).await);

    uow.rollback().await.unwrap();
    assert!(!committed(&uow, &id).await);
}

#[tokio::test]
async fn test_in_memory_unit_of_work_hands_out_shared_repositories() {
    let catalog = InMemoryCatalog::default();
    let uow = InMemoryUnitOfWork::new(Arc::new(RepositoryContainer::for_in_memory(&catalog)));
    let movie = category("Movie");

    let repo = uow.get_repository::<dyn CategoryRepository>().await.unwrap();
    repo.insert(&movie).await.unwrap();
    assert!(uow.transaction().await.is_none());

    // no physical transaction: rollback cannot undo the write
    uow.start().await.unwrap();
    uow.rollback().await.unwrap();
    assert_eq!(catalog.categories.items().await, vec![movie]);
}

#[tokio::test]
async fn test_unregistered_repository() {
    let uow = InMemoryUnitOfWork::new(Arc::new(RepositoryContainer::new()));
    let err = uow.resolve(RepositoryName::Video).await.err().unwrap();
    assert_eq!(err.to_string(), "Repository VideoRepository not found");
}

#[tokio::test]
async fn test_exists_by_id_inside_transaction_sees_pending_rows() {
    let uow = store_uow();
    let movie = category("Movie");

    uow.start().await.unwrap();
    let repo = uow.get_repository::<dyn CategoryRepository>().await.unwrap();
    repo.insert(&movie).await.unwrap();
    let missing = CategoryId::new();

    let partition = repo
        .exists_by_id(&[movie.entity_id().clone(), missing.clone()])
        .await
        .unwrap();
    assert_eq!(partition.exists, vec![movie.entity_id().clone()]);
    assert_eq!(partition.not_exists, vec![missing]);
    uow.commit().await.unwrap();
}

#[tokio::test]
async fn test_two_units_on_one_store_keep_both_commits() {
    let store = Arc::new(Store::default());
    let first = StoreUnitOfWork::for_catalog(store.clone());
    let second = StoreUnitOfWork::for_catalog(store.clone());
    let movie = category("Movie");
    let series = category("Series");

    first.start().await.unwrap();
    second.start().await.unwrap();
    first
        .get_repository::<dyn CategoryRepository>()
        .await
        .unwrap()
        .insert(&movie)
        .await
        .unwrap();
    second
        .get_repository::<dyn CategoryRepository>()
        .await
        .unwrap()
        .insert(&series)
        .await
        .unwrap();
    first.commit().await.unwrap();
    second.commit().await.unwrap();

    let reader = CategoryStoreRepository::unbound(store);
    reader.insert(&category("Documentary")).await.unwrap();
    let mut names: Vec<String> = reader
        .find_all()
        .await
        .unwrap()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Documentary", "Movie", "Series"]);
}

#[tokio::test]
async fn test_concurrent_insert_of_the_same_id_fails_the_second_commit() {
    let store = Arc::new(Store::default());
    let first = StoreUnitOfWork::for_catalog(store.clone());
    let second = StoreUnitOfWork::for_catalog(store.clone());
    let movie = category("Movie");

    for uow in [&first, &second] {
        uow.start().await.unwrap();
        uow.get_repository::<dyn CategoryRepository>()
            .await
            .unwrap()
            .insert(&movie)
            .await
            .unwrap();
    }
    first.commit().await.unwrap();

    let err = second.commit().await.unwrap_err();
    assert!(matches!(err, DomainError::Storage(_)));
    assert_eq!(second.state().await, UnitOfWorkState::Idle);
    assert!(committed(&first, movie.id()).await);
}
