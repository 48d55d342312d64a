//! Array payload (spec.md §3, §2.4). Grounded on the teacher crate's
//! `til/array.rs`, which pairs an element type with a count and a "base"
//! stride; generalized here to the five C array flavors (fixed, `static`,
//! incomplete, VLA, unspecified-VLA) plus GCC/Clang vector extensions.

use std::rc::Rc;

use super::{Payload, Type};
use crate::qualifiers::Qualifiers;
use crate::specifier::Specifier;

/// `len: None` means "no fixed element count" — used for incomplete arrays
/// (`int x[]`). Fixed-size and `static`-qualified arrays (`int x[3]`,
/// `f(int x[static 3])`) both carry `Some(len)`; the `static` distinction
/// lives in the specifier (`Specifier::StaticArray`), not here.
#[derive(Debug, Clone)]
pub struct ArrayData {
    pub elem: Type,
    pub len: Option<u64>,
}

impl ArrayData {
    pub fn new(elem: Type, len: Option<u64>) -> Self {
        ArrayData { elem, len }
    }
}

impl Type {
    fn array_of(specifier: Specifier, elem: Type, len: Option<u64>) -> Self {
        Type {
            specifier,
            qualifiers: Qualifiers::NONE,
            payload: Payload::Array(Rc::new(ArrayData::new(elem, len))),
        }
    }

    /// `T x[3]`.
    pub fn array(elem: Type, len: u64) -> Self {
        Type::array_of(Specifier::Array, elem, Some(len))
    }

    /// `f(T x[static 3])` — a function-parameter array guaranteeing at least
    /// `len` elements (spec.md §2.4 edge case).
    pub fn static_array(elem: Type, len: u64) -> Self {
        Type::array_of(Specifier::StaticArray, elem, Some(len))
    }

    /// `T x[]`.
    pub fn incomplete_array(elem: Type) -> Self {
        Type::array_of(Specifier::IncompleteArray, elem, None)
    }

    /// GCC/Clang `T __attribute__((vector_size(N))) x`. `len` is the element
    /// count, not the byte width.
    pub fn vector(elem: Type, len: u64) -> Self {
        Type::array_of(Specifier::Vector, elem, Some(len))
    }

    pub fn array_len(&self) -> Option<u64> {
        self.payload_array().and_then(|a| a.len)
    }

    pub fn array_elem(&self) -> Option<&Type> {
        if let Some(a) = self.payload_array() {
            return Some(&a.elem);
        }
        if let Some(sub) = self.payload_sub_type() {
            return Some(sub);
        }
        self.payload_expr().map(|e| &e.ty)
    }
}
