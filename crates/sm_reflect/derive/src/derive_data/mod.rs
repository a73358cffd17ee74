//! Parsed form of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod reflect_meta;
mod reflect_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use reflect_meta::ReflectMeta;
pub(crate) use reflect_struct::ReflectStruct;
