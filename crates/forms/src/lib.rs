//! Form enhancements for the Esperança site.
//!
//! This crate provides:
//! - Progressive input masks for Brazilian document and contact formats
//! - Field and form validation with a configurable message table
//! - Text and pt-BR formatting utilities
//! - An idempotent mask binder driven by content-ready notifications

pub mod binder;
pub mod mask;
pub mod text;
pub mod validate;

pub use binder::{MaskBinder, MaskKind};
pub use validate::{FieldError, FieldInput, ValidationMessages};
