// Copyright 2025 Cowboy AI, LLC.

//! Cast member aggregate and its repository

mod aggregate;
mod repository;

pub use aggregate::{
    CastMember, CastMemberId, CastMemberJson, CastMemberProps, CastMemberType,
    CastMemberValidator, InvalidCastMemberTypeError,
};
pub use repository::{
    CastMemberFilter, CastMemberInMemoryRepository, CastMemberRawFilter, CastMemberRepository,
    CastMemberSearch, CastMemberSearchParams, CastMemberSearchResult, CastMemberStoreRepository,
};
