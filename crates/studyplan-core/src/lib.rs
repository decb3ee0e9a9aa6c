//! # Studyplan Core Library
//!
//! This library provides the core business logic for Studyplan, a
//! study-planning toolkit. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI
//! surface being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Allocation Engine**: A pure, stateless heuristic that ranks subjects
//!   and partitions a daily study window into study and break slots
//! - **Subject Store**: SQLite-based subject CRUD and study-session log
//! - **Configuration**: TOML-based planner preferences
//!
//! ## Key Components
//!
//! - [`engine::rank`] / [`engine::allocate`]: The two engine stages
//! - [`SubjectDb`]: Subject and session persistence
//! - [`Config`]: Application configuration management

pub mod engine;
pub mod error;
pub mod storage;
pub mod subject;

pub use engine::{allocate, build_plan, rank, Preferences, SlotKind, StudySlot};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use storage::{Config, StudyStats, SubjectDb};
pub use subject::{Priority, Subject};
