//! # formguard-core
//!
//! Declarative, rule-based validation of web form fields.
//!
//! This crate provides:
//! - A [`Rule`] enum parsed once from text such as `"minLength:2"`
//! - Field and form specifications with per-rule error messages
//! - A pure [`ValidationEngine`] reporting the first failing rule per field
//! - JSON configuration loading
//! - Input normalizers for phone numbers, names and emails
//!
//! ## Quick Start
//!
//! ```rust
//! use formguard_core::{FieldSpec, FormSpec, Rule, ValidationEngine};
//! use std::collections::HashMap;
//!
//! let spec = FormSpec::builder()
//!     .field(
//!         FieldSpec::new("email")
//!             .rule_with_message(Rule::Required, "Email is required")
//!             .rule_with_message(Rule::Email, "Enter a valid email"),
//!     )
//!     .field(FieldSpec::new("phone").rule(Rule::Phone))
//!     .build()
//!     .unwrap();
//!
//! let engine = ValidationEngine::new(spec);
//!
//! let state = engine.validate_field("email", "not-an-email").unwrap();
//! assert_eq!(state.message(), Some("Enter a valid email"));
//!
//! let mut values = HashMap::new();
//! values.insert("email".to_string(), "ana@example.com".to_string());
//! let result = engine.validate_form(&values);
//! assert!(result.is_valid);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use formguard_core::FormSpec;
//!
//! let spec = FormSpec::from_json(r#"{
//!     "fields": [
//!         {
//!             "name": "nombre",
//!             "rules": ["required", "minLength:2", "name"],
//!             "messages": {"required": "El nombre es obligatorio"}
//!         }
//!     ]
//! }"#).unwrap();
//! assert!(spec.field("nombre").unwrap().is_required());
//!
//! // Malformed parameters fail when the spec is built.
//! assert!(FormSpec::from_json(
//!     r#"{"fields": [{"name": "x", "rules": ["maxLength:many"]}]}"#
//! ).is_err());
//! ```

mod config;
pub mod contact;
mod engine;
mod error;
pub mod normalize;
mod rule;
mod schema;
mod state;

pub use config::{Choice, FieldConfig, FormConfig, WidgetKind};
pub use contact::{contact_config, contact_form};
pub use engine::ValidationEngine;
pub use error::{ConfigError, FormError, Result};
pub use normalize::{Normalizer, Trigger};
pub use rule::{Rule, RuleKind, MIN_PHONE_LENGTH};
pub use schema::{FieldSpec, FormSpec, FormSpecBuilder};
pub use state::{FieldState, FieldStatus, ValidationResult};
