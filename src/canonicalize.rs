//! Canonicalization (spec.md §4.2): collapsing a chain of `typeof` and
//! `attributed` wrappers down to the underlying type. No teacher file
//! models this directly; it generalizes the teacher's plain payload-match
//! dispatch (`til.rs`'s `Type` accessors) to a loop whose termination
//! follows the same argument the spec gives: each unwrap strictly reduces
//! to a sub-node built strictly before the wrapper.

use crate::qualifiers::Qualifiers;
use crate::specifier::Specifier;
use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalMode {
    /// Used everywhere except when deriving an array/pointer's element type
    /// from a `typeof`-wrapped array/pointer: qualifiers accumulated while
    /// unwrapping applied to the `typeof` expression, not to what it names,
    /// so they are discarded once the final shape is a pointer or array.
    Standard,
    /// Used by `elemType`: qualifiers accumulated while unwrapping are kept
    /// and merged onto the element, so `typeof(const int[4])`'s element is
    /// `const int` (spec.md §8 scenario 5).
    PreserveQuals,
}

/// Strips `attributed` (always) and any chain of `typeof_type`/`typeof_expr`
/// (and their decayed twins) wrappers, accumulating qualifiers via
/// [`Qualifiers::merge_all`] along the way.
pub fn canonicalize(ty: &Type, mode: CanonicalMode) -> Type {
    let mut current = match ty.attributed_base() {
        Some(base) => base.clone(),
        None => ty.clone(),
    };
    let mut acc = Qualifiers::NONE;

    loop {
        let specifier = current.specifier();
        if !specifier.is_typeof() {
            break;
        }
        acc = acc.merge_all(current.qualifiers());
        let decayed = specifier.is_decayed();

        let mut unwrapped = match specifier {
            Specifier::TypeofType | Specifier::DecayedTypeofType => current
                .payload_sub_type()
                .expect("typeof_type always carries sub_type")
                .clone(),
            Specifier::TypeofExpr | Specifier::DecayedTypeofExpr => current
                .expr_payload()
                .expect("typeof_expr always carries expr")
                .ty
                .clone(),
            _ => unreachable!("is_typeof() only matches the four arms above"),
        };
        if decayed {
            unwrapped = unwrapped.with_decayed_specifier();
        }
        // Another attributed wrapper can sit just inside a typeof, e.g.
        // `typeof(attr_type)`; strip it before checking for further typeof
        // nesting so the loop condition above stays simple.
        if let Some(base) = unwrapped.attributed_base() {
            unwrapped = base.clone();
        }
        current = unwrapped;
    }

    let keep_quals = match mode {
        CanonicalMode::Standard => !(current.is_pointer() || current.is_array()),
        CanonicalMode::PreserveQuals => true,
    };
    if keep_quals && acc.any() {
        current.with_qualifiers(current.qualifiers().merge_all(acc))
    } else {
        current
    }
}
