//! Struct/union payload (spec.md §2.7, §5). Grounded on the teacher crate's
//! `til/struct.rs` and `til/union.rs`, merged into one module the way
//! spec.md treats struct and union as one shape distinguished only by the
//! outer specifier (`Struct` vs `Union`) and a different size rule in the
//! layout engine.
//!
//! spec.md's Design Notes (§9) flag the "incomplete = `fields.len() ==
//! usize::MAX`" sentinel as an encoding a language with sum types should
//! replace with an explicit variant; this is that replacement; see
//! DESIGN.md.

use std::cell::RefCell;
use std::rc::Rc;

use super::attributed::Attribute;
use super::Type;
use crate::interner::Symbol;

/// A single member: a regular field, or a bitfield if `bit_width.is_some()`.
/// An unnamed zero-width bitfield (`int : 0;`) forces the next bitfield onto
/// a fresh allocation unit, same as in C; it has `name: None`, `bit_width:
/// Some(0)`.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: Option<Symbol>,
    pub ty: Type,
    pub bit_width: Option<u32>,
    /// The optional per-field `attribute_list` spec.md §3's payload grammar
    /// marks with `field_attributes?` — `aligned(N)` is the only one the
    /// layout engine reads itself; the rest just round-trip through the
    /// printer the same way a record's own attributes do.
    pub attributes: Vec<Attribute>,
    /// Filled in once by the layout engine; absent until then.
    pub layout: RefCell<Option<FieldLayout>>,
}

impl Field {
    pub fn new(name: Option<Symbol>, ty: Type, bit_width: Option<u32>) -> Self {
        Field::with_attributes(name, ty, bit_width, Vec::new())
    }

    pub fn with_attributes(
        name: Option<Symbol>,
        ty: Type,
        bit_width: Option<u32>,
        attributes: Vec<Attribute>,
    ) -> Self {
        Field {
            name,
            ty,
            bit_width,
            attributes,
            layout: RefCell::new(None),
        }
    }

    pub fn is_bitfield(&self) -> bool {
        self.bit_width.is_some()
    }

    pub fn is_unnamed_padding_bitfield(&self) -> bool {
        self.name.is_none() && self.bit_width.is_some()
    }

    pub fn layout(&self) -> Option<FieldLayout> {
        *self.layout.borrow()
    }

    pub fn set_layout(&self, layout: FieldLayout) {
        *self.layout.borrow_mut() = Some(layout);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub offset_bits: u64,
    pub size_bits: u64,
}

/// A completed record's members plus its own aggregate layout (set once, by
/// the layout engine, right after completion — see `layout.rs`).
#[derive(Debug)]
pub struct RecordMembers {
    pub fields: Vec<Field>,
    pub size_bits: RefCell<Option<u64>>,
    pub align_bits: RefCell<Option<u64>>,
}

#[derive(Debug)]
enum Completion {
    Incomplete,
    Complete(Rc<RecordMembers>),
}

#[derive(Debug)]
pub struct RecordData {
    pub name: Option<Symbol>,
    /// True for a record declared `packed` (`__attribute__((packed))`),
    /// which disables inter-field padding in the layout engine.
    pub packed: bool,
    completion: RefCell<Completion>,
}

impl RecordData {
    pub fn new_incomplete(name: Option<Symbol>, packed: bool) -> Self {
        RecordData {
            name,
            packed,
            completion: RefCell::new(Completion::Incomplete),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(*self.completion.borrow(), Completion::Complete(_))
    }

    pub fn members(&self) -> Option<Rc<RecordMembers>> {
        match &*self.completion.borrow() {
            Completion::Complete(m) => Some(Rc::clone(m)),
            Completion::Incomplete => None,
        }
    }

    /// One-shot transition from incomplete to complete. Panics if the record
    /// is already complete: a record is only ever defined once (spec.md §5
    /// "complete a previously-incomplete record/enum in place").
    pub fn complete(&self, fields: Vec<Field>) {
        let mut completion = self.completion.borrow_mut();
        assert!(
            matches!(*completion, Completion::Incomplete),
            "record completed twice"
        );
        *completion = Completion::Complete(Rc::new(RecordMembers {
            fields,
            size_bits: RefCell::new(None),
            align_bits: RefCell::new(None),
        }));
    }
}

impl Type {
    pub fn new_record(specifier: crate::specifier::Specifier, name: Option<Symbol>, packed: bool) -> Self {
        debug_assert!(matches!(
            specifier,
            crate::specifier::Specifier::Struct | crate::specifier::Specifier::Union
        ));
        Type {
            specifier,
            qualifiers: crate::qualifiers::Qualifiers::NONE,
            payload: super::Payload::Record(Rc::new(RecordData::new_incomplete(name, packed))),
        }
    }

    pub fn record_data(&self) -> Option<&Rc<RecordData>> {
        self.payload_record()
    }

    pub fn complete_record(&self, fields: Vec<Field>) {
        if let Some(r) = self.payload_record() {
            r.complete(fields);
        }
    }

    pub fn record_members(&self) -> Option<Rc<RecordMembers>> {
        self.payload_record().and_then(|r| r.members())
    }
}
