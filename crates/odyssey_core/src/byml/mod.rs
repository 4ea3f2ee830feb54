//! BYML-XML scene support.
//!
//! Scenario files are BYML documents dumped to XML. Every node uses a
//! generic type tag (`T160`, `T192`, ...) and stores its key in an `N`
//! attribute and its scalar value in a `V` attribute. This module decodes
//! those files and resolves the placed objects they describe.
//!
//! ## Document shape
//!
//! ```text
//! <Root>
//!   <BymlRoot>
//!     <T192>                      scenario root
//!       <T192>                    scenario entry
//!         <T192 N="ObjectList">   object list
//!           <T193>                object
//!             <T160 N="Id" V="obj42"/>
//!             <T160 N="ModelName" V="Kuribo"/>
//!             <T193 N="Translate">
//!               <T210 N="X" V="0.0"/> ...
//! ```
//!
//! Only the nesting depth matters for entries, lists and objects; their
//! tags are not checked. Field lookups inside an object are keyed by `N`
//! and never positional.
//!
//! # Example
//!
//! ```ignore
//! use odyssey_core::byml::{decode, walk_all};
//!
//! let document = decode(&std::fs::read("scenario.xml")?)?;
//! let outcome = walk_all(&document)?;
//! println!("{} objects, {} skipped", outcome.objects.len(), outcome.skipped.len());
//! ```

pub mod schema;

mod decoder;
mod document;
mod object;
mod types;
mod vector;
mod walker;

pub use decoder::*;
pub use document::*;
pub use object::*;
pub use types::*;
pub use vector::*;
pub use walker::*;
