//! Promotion configuration editor for an ERP back-office.
//!
//! This crate provides the promotion rule model, its validation rules, the
//! translation between the backend's wire shapes and the canonical model,
//! and an editing session that saves and deletes promotions through
//! injected collaborators. Promotions are evaluated by the backend, not here.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod models;
pub mod validation;
pub mod wire;
