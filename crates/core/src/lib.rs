//! Core business logic for Expensa.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `directory` - Users, roles, and companies
//! - `currency` - Exchange-rate quotes and base-currency conversion
//! - `workflow` - Approval rules, chain building, and the decision state machine

pub mod currency;
pub mod directory;
pub mod workflow;
