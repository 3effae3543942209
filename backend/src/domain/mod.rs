//! Domain primitives, ports, and the user directory service.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport agnostic failure payload.
//! - User, UserId, UserProfile: the persisted record and its parts.
//! - TraceId: request-scoped correlation identifier.
//! - UserDirectoryService: the CRUD use-cases over a `UserRepository`.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_directory_service;

pub use self::error::{DomainError, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    InvalidUserId, ProfileValidationError, User, UserDecodeError, UserField, UserId, UserProfile,
};
pub use self::user_directory_service::{
    DEFAULT_STORE_DEADLINE, USER_NOT_FOUND, UserDirectoryService,
};
