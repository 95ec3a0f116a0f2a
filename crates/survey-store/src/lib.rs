//! PostgreSQL persistence for survey round responses.

pub mod pg_response_repository;
