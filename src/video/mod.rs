// Copyright 2025 Cowboy AI, LLC.

//! Video aggregate, its value objects and its repository

mod aggregate;
mod repository;
mod value_objects;

pub use aggregate::{Video, VideoCreateCommand, VideoId, VideoJson, VideoProps, VideoValidator};
pub use repository::{VideoInMemoryRepository, VideoRepository, VideoStoreRepository};
pub use value_objects::{
    InvalidMinutesError, InvalidRatingError, InvalidYearError, Minutes, Rating, Year,
};
