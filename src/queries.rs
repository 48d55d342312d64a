//! Type queries (spec.md §4.3): predicates and accessors that transparently
//! unwrap `typeof`/`attributed` wrappers. Grounded on the teacher crate's
//! `til.rs` accessor methods (`is_*`/`get_*` on `Type`), generalized from a
//! fixed binary-format tag set to the full specifier algebra, and layered
//! on top of [`crate::canonicalize`] rather than hand-unwrapping at each
//! call site.

use crate::canonicalize::{canonicalize, CanonicalMode};
use crate::interner::{is_anonymous_name, StringInterner};
use crate::specifier::Specifier;
use crate::target::Target;
use crate::types::{FunctionData, Param};
use crate::types::Type;

fn canon(ty: &Type) -> Type {
    canonicalize(ty, CanonicalMode::Standard)
}

pub fn is_void(ty: &Type) -> bool {
    canon(ty).specifier() == Specifier::Void
}

pub fn is_bool(ty: &Type) -> bool {
    canon(ty).specifier() == Specifier::Bool
}

pub fn is_nullptr_t(ty: &Type) -> bool {
    canon(ty).specifier() == Specifier::NullptrT
}

pub fn is_int(ty: &Type) -> bool {
    let s = canon(ty).specifier();
    s.is_real_integer() || s.is_complex_integer() || matches!(s, Specifier::BitInt | Specifier::ComplexBitInt)
}

pub fn is_float(ty: &Type) -> bool {
    let s = canon(ty).specifier();
    s.is_real_float() || s.is_complex_float()
}

pub fn is_complex(ty: &Type) -> bool {
    canon(ty).specifier().is_complex()
}

pub fn is_ptr(ty: &Type) -> bool {
    canon(ty).is_pointer()
}

pub fn is_func(ty: &Type) -> bool {
    canon(ty).is_func()
}

pub fn is_array(ty: &Type) -> bool {
    canon(ty).specifier().is_any_array()
}

pub fn is_vector(ty: &Type) -> bool {
    canon(ty).specifier().is_vector()
}

pub fn is_record(ty: &Type) -> bool {
    canon(ty).is_record()
}

pub fn is_enum(ty: &Type) -> bool {
    canon(ty).specifier() == Specifier::Enum
}

pub fn is_scalar(ty: &Type) -> bool {
    is_int(ty) || is_float(ty) || is_ptr(ty) || is_nullptr_t(ty)
}

/// Guards the tag-convention invariant spec.md §4.3 calls out: no specifier
/// claims to be decayed without truly being a decayable specifier's `+1`.
pub fn is_decayed(ty: &Type) -> bool {
    let canonical = canonicalize(ty, CanonicalMode::PreserveQuals);
    canonical.specifier().is_decayed()
}

pub fn is_anonymous_record(ty: &Type, interner: &dyn StringInterner) -> bool {
    let canonical = canon(ty);
    if !canonical.is_record() {
        return false;
    }
    match canonical.name() {
        Some(sym) => is_anonymous_name(interner.lookup(sym)),
        None => true,
    }
}

/// Pointee/element type. For `typeof`-wrapped arrays/pointers this uses
/// `preserve_quals` canonicalization and merges the wrapper's qualifiers
/// onto the element (spec.md §8 scenario 5); for `invalid` it returns
/// `invalid` rather than panicking.
pub fn elem_type(ty: &Type) -> Type {
    if ty.specifier() == Specifier::Invalid {
        return Type::invalid();
    }
    let canonical = canonicalize(ty, CanonicalMode::PreserveQuals);
    match canonical.array_elem() {
        Some(elem) => elem.clone().with_qualifiers(elem.qualifiers().merge_all(canonical.qualifiers())),
        None => canonical
            .pointee()
            .map(|p| p.clone().with_qualifiers(p.qualifiers().merge_all(canonical.qualifiers())))
            .unwrap_or_else(Type::invalid),
    }
}

pub fn return_type(ty: &Type) -> Option<Type> {
    function_data(ty).map(|f| f.return_type.clone())
}

pub fn params(ty: &Type) -> Vec<Param> {
    function_data(ty).map(|f| f.params.clone()).unwrap_or_default()
}

fn function_data(ty: &Type) -> Option<std::rc::Rc<FunctionData>> {
    let canonical = canon(ty);
    canonical.payload_func().cloned()
}

pub fn array_len(ty: &Type) -> Option<u64> {
    canon(ty).array_len()
}

/// C integer promotion (spec.md §4.3): small integer types widen to `int`
/// (or `uint` when `int` can't represent every `ushort` value); everything
/// else, including complex integers and `_BitInt`, passes through unchanged.
pub fn integer_promotion(ty: &Type, target: &Target) -> Type {
    let canonical = canon(ty);
    let promote_to_int = matches!(
        canonical.specifier(),
        Specifier::Bool | Specifier::Char | Specifier::SChar | Specifier::UChar | Specifier::Short
    );
    if promote_to_int {
        return Type::basic(Specifier::Int);
    }
    if canonical.specifier() == Specifier::UShort {
        return if target.size_short.get() == target.size_int.get() {
            Type::basic(Specifier::UInt)
        } else {
            Type::basic(Specifier::Int)
        };
    }
    if canonical.specifier() == Specifier::Enum {
        return match canonical.enum_data().and_then(|e| e.fixed_underlying) {
            Some(tag) => Type::basic(tag),
            None if canonical.enum_is_complete() => Type::basic(Specifier::Int),
            None => Type::basic(Specifier::Int),
        };
    }
    ty.clone()
}
