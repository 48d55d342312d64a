//! Function payload (spec.md §2.5, §4.3). Grounded on the teacher crate's
//! `til/function.rs`, which pairs a return type with an ordered parameter
//! list and a variadic flag; generalized to also track C's third function
//! flavor, the old-style (K&R, unprototyped) declaration.

use std::rc::Rc;

use super::{Payload, Type};
use crate::interner::Symbol;
use crate::qualifiers::Qualifiers;
use crate::specifier::Specifier;
use crate::SourceToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// `int f(int, char)` — has a prototype, fixed arity.
    Prototyped,
    /// `int f(int, ...)` — has a prototype, variadic.
    VarArgs,
    /// `int f()` — no prototype; params are unknown, not empty.
    OldStyle,
}

impl FunctionKind {
    pub fn to_specifier(self) -> Specifier {
        match self {
            FunctionKind::Prototyped => Specifier::Func,
            FunctionKind::VarArgs => Specifier::VarArgsFunc,
            FunctionKind::OldStyle => Specifier::OldStyleFunc,
        }
    }

    pub fn from_specifier(s: Specifier) -> Option<Self> {
        match s {
            Specifier::Func => Some(FunctionKind::Prototyped),
            Specifier::VarArgsFunc => Some(FunctionKind::VarArgs),
            Specifier::OldStyleFunc => Some(FunctionKind::OldStyle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Param {
    pub ty: Type,
    pub name: Option<Symbol>,
    pub name_tok: Option<SourceToken>,
}

#[derive(Debug, Clone)]
pub struct FunctionData {
    pub return_type: Type,
    pub params: Vec<Param>,
}

impl Type {
    pub fn func(kind: FunctionKind, return_type: Type, params: Vec<Param>) -> Self {
        Type::func_raw(kind.to_specifier(), return_type, params)
    }

    pub(crate) fn func_raw(specifier: Specifier, return_type: Type, params: Vec<Param>) -> Self {
        debug_assert!(specifier.is_func());
        Type {
            specifier,
            qualifiers: Qualifiers::NONE,
            payload: Payload::Func(Rc::new(FunctionData { return_type, params })),
        }
    }

    pub fn function_kind(&self) -> Option<FunctionKind> {
        FunctionKind::from_specifier(self.specifier())
    }
}
