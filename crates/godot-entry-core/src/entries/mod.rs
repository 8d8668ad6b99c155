//! Resolved declaration entries.
//!
//! This module provides the declaration types the generator reads:
//!
//! - [`ClassDeclaration`] - A user or library class
//! - [`FunctionDeclaration`] - A member function
//! - [`PropertyDeclaration`] - A member property (signals are properties too)
//! - [`ConstructorDeclaration`] - A class constructor
//!
//! Supporting types:
//! - [`ClassMembers`] - The two member representations (source / compiled)
//! - [`MemberSource`] - Uniform read access over both representations

mod class;
mod function;
mod members;
mod property;

pub use class::{ClassDeclaration, ConstructorDeclaration};
pub use function::{FunctionDeclaration, ValueParameter};
pub use members::{ClassMembers, MemberDeclaration, MemberScope, MemberSource};
pub use property::PropertyDeclaration;
