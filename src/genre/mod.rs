// Copyright 2025 Cowboy AI, LLC.

//! Genre aggregate, its repository and its use cases

mod aggregate;
mod repository;
pub mod use_cases;

pub use aggregate::{Genre, GenreId, GenreJson, GenreProps, GenreValidator};
pub use repository::{
    GenreFilter, GenreInMemoryRepository, GenreRawFilter, GenreRepository, GenreSearch,
    GenreSearchParams, GenreSearchResult, GenreStoreRepository,
};
