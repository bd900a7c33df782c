pub mod account_repository;
pub mod token_codec;
