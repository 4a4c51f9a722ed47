//! Famtree Core Types and Definitions
//!
//! This crate provides the foundational types shared by the famtree layout
//! engine and its command-line front end. It includes:
//!
//! - **Identifiers**: String-interned person identifiers ([`identifier::PersonId`])
//! - **Model**: People and pairwise relations ([`model`] module)
//! - **Collation**: Display-name ordering used by every tie-break ([`collation`] module)
//! - **Geometry**: Points, sizes, bounds and horizontal intervals ([`geometry`] module)
//! - **Colors**: CSS color handling for rendering ([`color::Color`])

pub mod collation;
pub mod color;
pub mod geometry;
pub mod identifier;
pub mod model;
