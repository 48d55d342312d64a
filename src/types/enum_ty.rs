//! Enum payload (spec.md §2.8, §5). Grounded on the teacher crate's
//! `til/enum.rs` (name, underlying storage unit, ordered enumerator list),
//! generalized to track whether the underlying type is a C23 fixed
//! `enum : T` or the traditional implementation-defined unit, and to use the
//! same explicit incomplete/complete split as `record.rs`.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Payload, Type};
use crate::interner::Symbol;
use crate::qualifiers::Qualifiers;
use crate::specifier::Specifier;

#[derive(Debug, Clone, Copy)]
pub struct EnumField {
    pub name: Symbol,
    pub value: i128,
}

#[derive(Debug)]
enum Completion {
    Incomplete,
    Complete(Rc<Vec<EnumField>>),
}

#[derive(Debug)]
pub struct EnumData {
    pub name: Option<Symbol>,
    /// `Some(spec)` for a C23 `enum E : int { ... }`; `None` lets the layout
    /// engine pick the smallest-fitting (or target-default) underlying type.
    pub fixed_underlying: Option<Specifier>,
    completion: RefCell<Completion>,
}

impl EnumData {
    pub fn new_incomplete(name: Option<Symbol>, fixed_underlying: Option<Specifier>) -> Self {
        EnumData {
            name,
            fixed_underlying,
            completion: RefCell::new(Completion::Incomplete),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(*self.completion.borrow(), Completion::Complete(_))
    }

    pub fn fields(&self) -> Option<Rc<Vec<EnumField>>> {
        match &*self.completion.borrow() {
            Completion::Complete(f) => Some(Rc::clone(f)),
            Completion::Incomplete => None,
        }
    }

    pub fn complete(&self, fields: Vec<EnumField>) {
        let mut completion = self.completion.borrow_mut();
        assert!(
            matches!(*completion, Completion::Incomplete),
            "enum completed twice"
        );
        *completion = Completion::Complete(Rc::new(fields));
    }
}

impl Type {
    pub fn new_enum(name: Option<Symbol>, fixed_underlying: Option<Specifier>) -> Self {
        Type {
            specifier: Specifier::Enum,
            qualifiers: Qualifiers::NONE,
            payload: Payload::Enum(Rc::new(EnumData::new_incomplete(name, fixed_underlying))),
        }
    }

    pub fn enum_data(&self) -> Option<&Rc<EnumData>> {
        self.payload_enum()
    }

    pub fn complete_enum(&self, fields: Vec<EnumField>) {
        if let Some(e) = self.payload_enum() {
            e.complete(fields);
        }
    }

    pub fn enum_fields(&self) -> Option<Rc<Vec<EnumField>>> {
        self.payload_enum().and_then(|e| e.fields())
    }
}
