//! Derived-type combinators (spec.md §4.6): the pointer/array/function
//! operations the parser applies to a base type while working through a
//! declarator, as distinct from the atomic-specifier accumulation
//! [`crate::builder::SpecifierBuilder`] handles. Grounded on
//! [`crate::qualifiers::QualifierBuilder::finish`]'s validate-then-repair
//! shape: diagnose a problem, then either best-effort repair and keep
//! going, or — for the one case spec.md §7 marks fatal — propagate an
//! error for the caller to abandon the declaration.

use anyhow::{bail, Result};

use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::qualifiers::Qualifiers;
use crate::specifier::Specifier;
use crate::types::{FunctionKind, Param, Type};
use crate::SourceToken;

pub fn make_pointer(pointee: Type) -> Type {
    Type::pointer(pointee)
}

/// Builds `T[len]` / `T[static len]` / `T[]`.
///
/// Fatal (spec.md §7) if `elem` is an incomplete struct/union/enum, or
/// `void`: returns `Err` so the caller can abandon the current
/// declaration rather than build a meaningless array type. Every other
/// problem here is non-fatal: diagnosed, then repaired so a usable type
/// still comes out the other end.
pub fn make_array(
    elem: Type,
    len: Option<u64>,
    is_static: bool,
    tok: SourceToken,
    sink: &mut impl DiagnosticSink,
) -> Result<Type> {
    if is_incomplete_element(&elem) {
        sink.err_tok(DiagnosticKind::ArrayIncompleteElem, tok);
        bail!("array of incomplete element type");
    }

    if elem.is_func() {
        sink.err_tok(DiagnosticKind::ArrayFuncElem, tok);
    }

    // `static` in a parameter array declarator (`f(int a[static 4])`) only
    // makes sense on the outermost dimension; `f(int a[3][static 4])` is
    // rejected but still built as an ordinary array so analysis continues.
    if is_static && elem.specifier().is_any_array() {
        sink.err_tok(DiagnosticKind::StaticNonOutermostArray, tok);
        return Ok(build_array(elem, len, false));
    }

    // A non-outermost array dimension can't itself carry cv-qualifiers
    // (`int a[3 const]` is nonsense; `const int a[3]` qualifies the
    // element, which is a different type already handled elsewhere).
    if elem.specifier().is_any_array() && elem.qualifiers().any() {
        sink.err_tok(DiagnosticKind::QualifierNonOutermostArray, tok);
        let repaired = elem.with_qualifiers(Qualifiers::NONE);
        return Ok(build_array(repaired, len, is_static));
    }

    Ok(build_array(elem, len, is_static))
}

fn build_array(elem: Type, len: Option<u64>, is_static: bool) -> Type {
    match (len, is_static) {
        (Some(n), true) => Type::static_array(elem, n),
        (Some(n), false) => Type::array(elem, n),
        (None, _) => Type::incomplete_array(elem),
    }
}

fn is_incomplete_element(ty: &Type) -> bool {
    match ty.specifier() {
        Specifier::Struct | Specifier::Union => !ty.record_is_complete(),
        Specifier::Enum => !ty.enum_is_complete(),
        Specifier::Void => true,
        _ => false,
    }
}

/// Builds a function type, diagnosing and repairing the two illegal
/// return-type shapes spec.md §7 lists (functions can't return an array or
/// another function), plus a cv-qualified return type — legal to write,
/// semantically inert, and repaired by stripping the qualifier (spec.md
/// §7: "strips a bad qualifier from a function's return type").
pub fn make_func(
    return_type: Type,
    kind: FunctionKind,
    params: Vec<Param>,
    tok: SourceToken,
    sink: &mut impl DiagnosticSink,
) -> Type {
    if return_type.specifier().is_any_array() {
        sink.err_tok(DiagnosticKind::FuncCannotReturnArray, tok);
    }
    if return_type.is_func() {
        sink.err_tok(DiagnosticKind::FuncCannotReturnFunc, tok);
    }

    let return_type = if return_type.qualifiers().is_const() || return_type.qualifiers().is_volatile() {
        sink.err_tok(DiagnosticKind::QualOnRetType, tok);
        return_type.with_qualifiers(
            return_type
                .qualifiers()
                .with_const(false)
                .with_volatile(false),
        )
    } else {
        return_type
    };

    Type::func(kind, return_type, params)
}
