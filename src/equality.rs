//! Structural type equality (spec.md §4.5). Grounded on the teacher
//! crate's size/shape comparison style in `til/size_calculator.rs`
//! (recursive, per-category dispatch with an explicit cache/guard against
//! infinite recursion through record members — here the guard is implicit:
//! record/enum compare by identity, so recursion never descends into their
//! own fields).

use crate::canonicalize::{canonicalize, CanonicalMode};
use crate::layout::alignof;
use crate::specifier::Specifier;
use crate::target::{LangOpts, Target};
use crate::types::Type;

/// `eql(a, b, comp, check_qualifiers)`. Both operands are canonicalized
/// first (`standard` mode); `check_qualifiers` gates `const`/`volatile`
/// comparison, `atomic` always participates.
pub fn eql(a: &Type, b: &Type, target: &Target, lang: &LangOpts, check_qualifiers: bool) -> bool {
    let a = canonicalize(a, CanonicalMode::Standard);
    let b = canonicalize(b, CanonicalMode::Standard);

    if alignof(&a, target, lang) != alignof(&b, target, lang) {
        return false;
    }
    if a.qualifiers().is_atomic() != b.qualifiers().is_atomic() {
        return false;
    }
    if check_qualifiers
        && (a.qualifiers().is_const() != b.qualifiers().is_const()
            || a.qualifiers().is_volatile() != b.qualifiers().is_volatile())
    {
        return false;
    }

    if a.is_pointer() && b.is_pointer() {
        return eql(
            a.pointee().expect("pointer always has pointee"),
            b.pointee().expect("pointer always has pointee"),
            target,
            lang,
            check_qualifiers,
        );
    }

    if a.is_func() && b.is_func() {
        return eql_func(&a, &b, target, lang);
    }

    if a.specifier().is_any_array() && b.specifier().is_any_array() {
        return eql_array(&a, &b, target, lang, check_qualifiers);
    }

    if a.specifier() != b.specifier() {
        return false;
    }

    match a.specifier() {
        Specifier::Struct | Specifier::Union | Specifier::Enum => {
            a.record_or_enum_identity() == b.record_or_enum_identity()
        }
        Specifier::BitInt | Specifier::ComplexBitInt => a.payload_bit_int() == b.payload_bit_int(),
        _ => true,
    }
}

fn eql_func(a: &Type, b: &Type, target: &Target, lang: &LangOpts) -> bool {
    let pa = a.payload_func().cloned();
    let pb = b.payload_func().cloned();
    let (Some(pa), Some(pb)) = (pa, pb) else {
        return false;
    };
    if pa.params.len() != pb.params.len() {
        return false;
    }
    // Return types compare with qualifiers ignored (spec.md §4.5).
    if !eql(&pa.return_type, &pb.return_type, target, lang, false) {
        return false;
    }
    pa.params.iter().zip(pb.params.iter()).all(|(x, y)| {
        let xt = x.ty.clone().with_qualifiers(x.ty.qualifiers().with_const(false).with_volatile(false));
        let yt = y.ty.clone().with_qualifiers(y.ty.qualifiers().with_const(false).with_volatile(false));
        eql(&xt, &yt, target, lang, true)
    })
}

fn eql_array(a: &Type, b: &Type, target: &Target, lang: &LangOpts, check_qualifiers: bool) -> bool {
    match (a.array_len(), b.array_len()) {
        (Some(x), Some(y)) if x != y => return false,
        _ => {}
    }
    let ea = a.array_elem();
    let eb = b.array_elem();
    match (ea, eb) {
        (Some(ea), Some(eb)) => eql(ea, eb, target, lang, check_qualifiers),
        _ => false,
    }
}
