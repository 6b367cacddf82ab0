// Copyright 2025 Cowboy AI, LLC.

//! Video repository

use crate::persistence::{
    InMemoryRepository, Repository, RepositoryName, Resolvable, StoreRepository,
};

use super::aggregate::Video;

/// Repository of videos; plain CRUD without search
pub trait VideoRepository: Repository<Video> {}

impl<T> VideoRepository for T where T: ?Sized + Repository<Video> {}

impl Resolvable for dyn VideoRepository {
    const NAME: RepositoryName = RepositoryName::Video;
}

/// In-memory video repository
pub type VideoInMemoryRepository = InMemoryRepository<Video>;

/// Store-backed video repository
pub type VideoStoreRepository = StoreRepository<Video>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryId;
    use crate::cast_member::CastMemberId;
    use crate::entity::Entity;
    use crate::genre::GenreId;
    use crate::persistence::Store;
    use crate::video::VideoCreateCommand;
    use std::sync::Arc;

    fn video(title: &str) -> Video {
        Video::create(VideoCreateCommand {
            title: title.to_string(),
            description: "synopsis".to_string(),
            year_launched: 1999,
            duration: 136,
            rating: "L".to_string(),
            opened: false,
            categories_id: vec![CategoryId::new()],
            genres_id: vec![GenreId::new()],
            cast_members_id: vec![CastMemberId::new()],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_store_repository_round_trip() {
        let repo: Arc<dyn VideoRepository> =
            Arc::new(VideoStoreRepository::unbound(Arc::new(Store::default())));
        let matrix = video("Matrix");
        repo.insert(&matrix).await.unwrap();

        let found = repo.find_by_id(matrix.id()).await.unwrap();
        assert_eq!(found, matrix);
    }

    #[tokio::test]
    async fn test_in_memory_delete() {
        let repo = VideoInMemoryRepository::new();
        let matrix = video("Matrix");
        repo.insert(&matrix).await.unwrap();
        repo.delete(matrix.id()).await.unwrap();

        assert!(repo.find_all().await.unwrap().is_empty());
        assert!(repo.delete(matrix.id()).await.unwrap_err().is_not_found());
    }
}
