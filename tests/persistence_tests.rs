// Copyright 2025 Cowboy AI, LLC.

//! Integration tests for repositories and the cross-aggregate id validator

use async_trait::async_trait;
use mockall::mock;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

use catalog_domain::cast_member::{
    CastMemberFilter, CastMemberSearchParams, CastMemberStoreRepository,
};
use catalog_domain::category::CategoryInMemoryRepository;
use catalog_domain::genre::{GenreRawFilter, GenreSearchParams, GenreStoreRepository};
use catalog_domain::persistence::IdPartition;
use catalog_domain::{
    AggregateIdsValidator, CastMember, CastMemberProps, CastMemberType, CategoriesIdsValidator,
    Category, CategoryId, CategoryProps, DomainError, DomainResult, Either, Entity, EntityId,
    Genre, GenreProps, InvalidIdentifierError, Repository, SearchInput, SearchableRepository,
    Store,
};

mock! {
    pub CategoryRepo {}

    #[async_trait]
    impl Repository<Category> for CategoryRepo {
        async fn insert(&self, entity: &Category) -> DomainResult<()>;
        async fn bulk_insert(&self, entities: &[Category]) -> DomainResult<()>;
        async fn find_by_id(&self, id: &str) -> DomainResult<Category>;
        async fn find_by_ids(&self, ids: &[CategoryId]) -> DomainResult<Vec<Category>>;
        async fn find_all(&self) -> DomainResult<Vec<Category>>;
        async fn update(&self, entity: &Category) -> DomainResult<()>;
        async fn delete(&self, id: &str) -> DomainResult<()>;
        async fn exists_by_id(&self, ids: &[CategoryId]) -> DomainResult<IdPartition<Category>>;
    }
}

fn messages(errors: &[DomainError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn test_validator_reports_every_malformed_id_without_touching_the_repository() {
    let mut repo = MockCategoryRepo::new();
    repo.expect_exists_by_id().never();
    let validator = AggregateIdsValidator::<Category, _>::new(Arc::new(repo));

    let result = validator.validate(vec!["1", "2"]).await.unwrap();

    let errors = result.fail_value().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|err| matches!(err, DomainError::InvalidIdentifier(_))));
    assert_eq!(
        messages(errors),
        vec!["ID 1 must be a valid UUID", "ID 2 must be a valid UUID"]
    );
}

#[tokio::test]
async fn test_validator_reports_every_missing_id_in_input_order() {
    let first = CategoryId::new();
    let second = CategoryId::new();

    let mut repo = MockCategoryRepo::new();
    repo.expect_exists_by_id()
        .times(1)
        .returning(|ids| Ok(IdPartition::split(ids, |_| false)));
    let validator = AggregateIdsValidator::<Category, _>::new(Arc::new(repo));

    let result = validator
        .validate(vec![first.to_string(), second.to_string()])
        .await
        .unwrap();

    assert_eq!(
        messages(result.fail_value().unwrap()),
        vec![
            format!("Category Not Found using ID ({first})"),
            format!("Category Not Found using ID ({second})"),
        ]
    );
}

#[tokio::test]
async fn test_validator_propagates_repository_failures() {
    let mut repo = MockCategoryRepo::new();
    repo.expect_exists_by_id()
        .returning(|_| Err(DomainError::Storage("connection lost".to_string())));
    let validator = AggregateIdsValidator::<Category, _>::new(Arc::new(repo));

    let err = validator
        .validate(CategoryId::new().to_string())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Storage error: connection lost");
}

#[tokio::test]
async fn test_categories_ids_validator_over_a_shared_repository() {
    let repo = Arc::new(CategoryInMemoryRepository::new());
    let movie = Category::create(CategoryProps::new("Movie")).unwrap();
    let series = Category::create(CategoryProps::new("Series")).unwrap();
    repo.bulk_insert(&[movie.clone(), series.clone()])
        .await
        .unwrap();

    let validator = CategoriesIdsValidator::new(repo);
    let result = validator
        .validate(vec![series.id(), movie.id()])
        .await
        .unwrap();

    assert_eq!(
        result,
        Either::ok(vec![series.entity_id().clone(), movie.entity_id().clone()])
    );
}

#[tokio::test]
async fn test_store_genre_search_by_category() {
    let store = Arc::new(Store::default());
    let repo = GenreStoreRepository::unbound(store);
    let movie = CategoryId::new();
    let series = CategoryId::new();
    repo.bulk_insert(&[
        Genre::create(GenreProps::new("Action", vec![movie.clone()])).unwrap(),
        Genre::create(GenreProps::new("Drama", vec![series.clone()])).unwrap(),
    ])
    .await
    .unwrap();

    let params = GenreSearchParams::create(SearchInput::new().filter(GenreRawFilter {
        name: None,
        categories_id: Some(vec![series.to_string()]),
    }))
    .unwrap();
    let result = repo.search(&params).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name(), "Drama");
    assert_eq!(repo.sortable_fields(), &["name", "created_at"]);
}

#[tokio::test]
async fn test_store_cast_member_search_by_type() {
    let repo = CastMemberStoreRepository::unbound(Arc::new(Store::default()));
    repo.bulk_insert(&[
        CastMember::create(CastMemberProps::new("Ana", CastMemberType::Director)).unwrap(),
        CastMember::create(CastMemberProps::new("Bia", CastMemberType::Actor)).unwrap(),
        CastMember::create(CastMemberProps::new("Caio", CastMemberType::Actor)).unwrap(),
    ])
    .await
    .unwrap();

    let params = CastMemberSearchParams::new(
        SearchInput::new()
            .sort("name")
            .sort_dir("desc")
            .filter(CastMemberFilter {
                name: None,
                member_type: Some(CastMemberType::Actor),
            }),
    );
    let result = repo.search(&params).await.unwrap();

    let names: Vec<&str> = result.items.iter().map(CastMember::name).collect();
    assert_eq!(names, vec!["Caio", "Bia"]);
}

proptest! {
    #[test]
    fn prop_identity_accepts_every_uuid(bytes in any::<[u8; 16]>()) {
        let raw = uuid::Uuid::from_bytes(bytes).to_string();
        let id = CategoryId::parse(raw.clone()).unwrap();
        prop_assert_eq!(id.as_str(), raw.as_str());
    }

    #[test]
    fn prop_identity_rejects_non_uuid_text(raw in "[a-z0-9 ]{0,40}") {
        let err: InvalidIdentifierError = EntityId::<Category>::parse(raw.clone()).unwrap_err();
        prop_assert!(err.to_string().contains(&raw));
    }
}
