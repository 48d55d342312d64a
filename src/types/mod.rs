//! The type value: `(specifier, qualifiers, payload)` (spec.md §3).
//!
//! Heap-owned payload variants are shared through `Rc`, standing in for the
//! "arena-allocated reference" spec.md describes: cheap to clone, no
//! lifetime parameter threading through the public API, and — since the
//! engine is single-threaded by design (spec.md §5) — `Rc` rather than `Arc`
//! is the right-weight primitive. See DESIGN.md for the full rationale.
//!
//! This module plays the role the teacher crate's `til.rs` plays for IDA's
//! type library: the top-level `Type` enum dispatch and the per-kind payload
//! modules it re-exports, generalized from "one binary format's type bytes"
//! to "the full C type algebra".

pub mod array;
pub mod attributed;
pub mod bitint;
pub mod enum_ty;
pub mod function;
pub mod pointer;
pub mod record;
pub mod typeof_ty;

use std::rc::Rc;

use crate::interner::Symbol;
use crate::qualifiers::Qualifiers;
use crate::specifier::Specifier;
use crate::AstNodeId;

pub use array::ArrayData;
pub use attributed::{Attribute, AttributeArgs, AttributeTag, AttributedData};
pub use bitint::BitIntData;
pub use enum_ty::{EnumData, EnumField};
pub use function::{FunctionData, FunctionKind, Param};
pub use record::{Field, FieldLayout, RecordData, RecordMembers};
pub use typeof_ty::ExprData;

#[derive(Debug, Clone)]
pub(crate) enum Payload {
    None,
    SubType(Rc<Type>),
    Func(Rc<FunctionData>),
    Array(Rc<ArrayData>),
    Expr(Rc<ExprData>),
    Record(Rc<RecordData>),
    Enum(Rc<EnumData>),
    Attributed(Rc<AttributedData>),
    BitInt(BitIntData),
}

/// A fully-formed C type. Cheap to copy (the `Clone` impl only bumps
/// reference counts on whatever heap payload it carries).
#[derive(Debug, Clone)]
pub struct Type {
    specifier: Specifier,
    qualifiers: Qualifiers,
    payload: Payload,
}

impl Type {
    pub fn specifier(&self) -> Specifier {
        self.specifier
    }

    pub fn qualifiers(&self) -> Qualifiers {
        self.qualifiers
    }

    pub(crate) fn set_qualifiers(&mut self, quals: Qualifiers) {
        self.qualifiers = quals;
    }

    pub fn with_qualifiers(mut self, quals: Qualifiers) -> Self {
        self.qualifiers = quals;
        self
    }

    pub fn invalid() -> Self {
        Type {
            specifier: Specifier::Invalid,
            qualifiers: Qualifiers::NONE,
            payload: Payload::None,
        }
    }

    /// A basic scalar specifier with no payload: `void`, `bool`, `nullptr_t`,
    /// any real/complex integer or float, or `special_va_start`.
    pub fn basic(specifier: Specifier) -> Self {
        debug_assert!(!specifier.is_any_array() && specifier != Specifier::BitInt);
        Type {
            specifier,
            qualifiers: Qualifiers::NONE,
            payload: Payload::None,
        }
    }

    pub fn pointer(pointee: Type) -> Self {
        Type {
            specifier: Specifier::Pointer,
            qualifiers: Qualifiers::NONE,
            payload: Payload::SubType(Rc::new(pointee)),
        }
    }

    pub fn bit_int(bits: u8, signed: bool, complex: bool) -> Self {
        let specifier = if complex {
            Specifier::ComplexBitInt
        } else {
            Specifier::BitInt
        };
        Type {
            specifier,
            qualifiers: Qualifiers::NONE,
            payload: Payload::BitInt(BitIntData { bits, signed }),
        }
    }

    pub fn typeof_type(inner: Type) -> Self {
        Type {
            specifier: Specifier::TypeofType,
            qualifiers: Qualifiers::NONE,
            payload: Payload::SubType(Rc::new(inner)),
        }
    }

    /// `typeof(expr)`. `resolved` is the expression's own type; `ast_node` is
    /// only ever handed back to the caller for diagnostics/printing.
    pub fn typeof_expr(ast_node: AstNodeId, resolved: Type) -> Self {
        Type {
            specifier: Specifier::TypeofExpr,
            qualifiers: Qualifiers::NONE,
            payload: Payload::Expr(Rc::new(ExprData {
                ast_node,
                ty: resolved,
            })),
        }
    }

    pub fn attributed(base: Type, attributes: Vec<Attribute>) -> Self {
        let attributes = match base.payload_attributed() {
            Some(existing) => existing
                .attributes
                .iter()
                .cloned()
                .chain(attributes)
                .collect(),
            None => attributes,
        };
        let base = match &base.payload {
            Payload::Attributed(a) => (*a.base).clone(),
            _ => base,
        };
        Type {
            specifier: Specifier::Attributed,
            qualifiers: Qualifiers::NONE,
            payload: Payload::Attributed(Rc::new(AttributedData { attributes, base })),
        }
    }

    pub fn special_va_start() -> Self {
        Type::basic(Specifier::SpecialVaStart)
    }

    // --- raw (non-canonicalizing) shape predicates -----------------------
    // These look only at this exact specifier, never unwrapping `typeof` or
    // `attributed`. They exist for call sites (like `QualifierBuilder`) that
    // run against the type being built directly, before any wrapper is
    // applied. Transparent, wrapper-unwrapping predicates live in `queries`.

    pub fn is_pointer(&self) -> bool {
        matches!(self.specifier, Specifier::Pointer)
    }

    pub fn is_array(&self) -> bool {
        self.specifier.is_any_array()
    }

    pub fn is_func(&self) -> bool {
        self.specifier.is_func()
    }

    pub fn is_record(&self) -> bool {
        matches!(self.specifier, Specifier::Struct | Specifier::Union)
    }

    pub fn record_is_complete(&self) -> bool {
        match &self.payload {
            Payload::Record(r) => r.is_complete(),
            _ => false,
        }
    }

    pub fn enum_is_complete(&self) -> bool {
        match &self.payload {
            Payload::Enum(e) => e.is_complete(),
            _ => false,
        }
    }

    pub(crate) fn payload_sub_type(&self) -> Option<&Type> {
        match &self.payload {
            Payload::SubType(t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn payload_func(&self) -> Option<&Rc<FunctionData>> {
        match &self.payload {
            Payload::Func(f) => Some(f),
            _ => None,
        }
    }

    pub(crate) fn payload_array(&self) -> Option<&Rc<ArrayData>> {
        match &self.payload {
            Payload::Array(a) => Some(a),
            _ => None,
        }
    }

    pub(crate) fn payload_expr(&self) -> Option<&Rc<ExprData>> {
        match &self.payload {
            Payload::Expr(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn payload_record(&self) -> Option<&Rc<RecordData>> {
        match &self.payload {
            Payload::Record(r) => Some(r),
            _ => None,
        }
    }

    pub(crate) fn payload_enum(&self) -> Option<&Rc<EnumData>> {
        match &self.payload {
            Payload::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn payload_attributed(&self) -> Option<&Rc<AttributedData>> {
        match &self.payload {
            Payload::Attributed(a) => Some(a),
            _ => None,
        }
    }

    pub(crate) fn payload_bit_int(&self) -> Option<BitIntData> {
        match &self.payload {
            Payload::BitInt(b) => Some(*b),
            _ => None,
        }
    }

    /// Identity comparison for record/enum payloads (spec.md §4.5: "Record/
    /// enum: identity equality of payload reference").
    pub(crate) fn record_or_enum_identity(&self) -> Option<usize> {
        match &self.payload {
            Payload::Record(r) => Some(Rc::as_ptr(r) as usize),
            Payload::Enum(e) => Some(Rc::as_ptr(e) as usize),
            _ => None,
        }
    }

    /// Bumps this type's specifier tag to its decayed twin, keeping the same
    /// payload and qualifiers. Used both by `queries::decay_array` (spec.md
    /// §4.8) and by `canonicalize` when unwrapping a `decayed_typeof_*`
    /// wrapper (spec.md §4.2).
    pub(crate) fn with_decayed_specifier(&self) -> Type {
        Type {
            specifier: self.specifier.decay(),
            qualifiers: self.qualifiers,
            payload: self.payload.clone(),
        }
    }

    /// Reverses [`Type::with_decayed_specifier`].
    pub(crate) fn with_undecayed_specifier(&self) -> Type {
        Type {
            specifier: self.specifier.undecay(),
            qualifiers: self.qualifiers,
            payload: self.payload.clone(),
        }
    }

    pub fn name(&self) -> Option<Symbol> {
        match &self.payload {
            Payload::Record(r) => r.name,
            Payload::Enum(e) => e.name,
            _ => None,
        }
    }
}
