//! SiteDesk: construction site management.
//!
//! Projects with their materials, visits, timeline, documents and photos are
//! kept in one JSON document. [`repository::ProjectRepository`] owns the
//! in-memory copy and every change in [`manage`] goes through it; [`views`]
//! derives the read models the desktop shell renders.

pub mod lenient;

pub mod annotate;
pub mod config;
pub mod document;
pub mod error;
pub mod import;
pub mod logging;
pub mod manage;
pub mod material;
pub mod metrics;
pub mod photo;
pub mod project;
pub mod repository;
pub mod seed;
pub mod shell;
pub mod store;
pub mod timeline;
pub mod views;
pub mod visit;
