//! # Board Client Library
//!
//! This crate provides the client-side data layer of a bulletin board:
//! - Typed wrappers over the board and user-service REST APIs
//! - A response normalizer reconciling inconsistent detail envelopes
//! - Stores for posts, notices, comments, files, the session and dialogs
//! - Client-side validation of uploads and notices
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities, normalization and validation rules
//! - **Application Layer**: Stores holding list, detail and request state
//! - **Infrastructure Layer**: HTTP transport, API wrappers and session storage
//!
//! ## Module Structure
//!
//! ```text
//! board_client/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, normalizer and validators
//! +-- application/    Stores
//! +-- infrastructure/ HTTP transport, API wrappers, key-value storage
//! +-- shared/         Common utilities (errors, validation, timestamps)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Stores
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Shared utilities
pub mod shared;

// Store context construction
pub mod startup;

// Telemetry and observability
pub mod telemetry;
