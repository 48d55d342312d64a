//! Layout engine (spec.md §4.4): `sizeof`, `bitSizeof`, `alignof`,
//! requested alignment, and `sizeCompare`. Grounded on the teacher crate's
//! `til/size_calculator.rs` (`TILTypeSizeSolver`): a recursion-guarded,
//! cache-backed solver dispatching per specifier, generalized from one
//! binary format's handful of type kinds to the full C type algebra and
//! from a single implicit target to an explicit [`Target`] parameter
//! threaded through every call.

use crate::canonicalize::{canonicalize, CanonicalMode};
use crate::specifier::Specifier;
use crate::target::{Dialect, Target};
use crate::types::Type;

/// `sizeof`/`alignof`/`bitSizeof` are "unknown" for incomplete types, VLAs,
/// and a few MSVC-specific cases — never an error, since asking is legal,
/// just uninformative until completion (spec.md §4.4).
pub type MaybeSize = Option<u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeOrdering {
    Lt,
    Gt,
    Eq,
    Indeterminate,
}

fn canon(ty: &Type) -> Type {
    canonicalize(ty, CanonicalMode::Standard)
}

/// Size in bytes.
///
/// `float80`/`complex_float80` are the one case where this isn't simply
/// `ceil(bit_sizeof / 8)`: their *bit* size is the x87 extended-precision
/// payload width (80 bits, spec.md invariant 5) but their *storage* size is
/// the target's padded slot (`target.size_float80`, 16 bytes on x86_64) —
/// so byte size is read off the target directly rather than derived from
/// `bit_sizeof`.
pub fn sizeof(ty: &Type, target: &Target, lang: &crate::target::LangOpts) -> MaybeSize {
    match canon(ty).specifier() {
        Specifier::Float80 => Some(target.size_float80.get() as u64),
        Specifier::ComplexFloat80 => Some(target.size_float80.get() as u64 * 2),
        _ => bit_sizeof(ty, target, lang).map(|bits| (bits + 7) / 8),
    }
}

/// Size in bits — the primitive the rest of the engine is built on, since
/// bitfields and `_BitInt(N)` don't live on byte boundaries.
pub fn bit_sizeof(ty: &Type, target: &Target, lang: &crate::target::LangOpts) -> MaybeSize {
    let ty = canon(ty);
    use Specifier::*;
    match ty.specifier() {
        Invalid => None,
        Void => Some(8),
        Bool => Some(if target.is_msvc() { 8 } else { 1 }),
        NullptrT => Some(target.pointer_width.get() as u64 * 8),

        Char | SChar | UChar => Some(8),
        Short | UShort => Some(target.size_short.get() as u64 * 8),
        Int | UInt => Some(target.size_int.get() as u64 * 8),
        Long | ULong => Some(target.size_long.get() as u64 * 8),
        LongLong | ULongLong => Some(target.size_long_long.get() as u64 * 8),
        Int128 | UInt128 => Some(target.size_int128.get() as u64 * 8),

        ComplexChar | ComplexSChar | ComplexUChar => Some(16),
        ComplexShort | ComplexUShort => Some(target.size_short.get() as u64 * 16),
        ComplexInt | ComplexUInt => Some(target.size_int.get() as u64 * 16),
        ComplexLong | ComplexULong => Some(target.size_long.get() as u64 * 16),
        ComplexLongLong | ComplexULongLong => Some(target.size_long_long.get() as u64 * 16),
        ComplexInt128 | ComplexUInt128 => Some(target.size_int128.get() as u64 * 16),

        BitInt => ty.payload_bit_int().map(|b| b.bits as u64),
        ComplexBitInt => ty.payload_bit_int().map(|b| b.bits as u64 * 2),

        Fp16 => Some(target.size_fp16.get() as u64 * 8),
        Float => Some(target.size_float.get() as u64 * 8),
        Double => Some(target.size_double.get() as u64 * 8),
        LongDouble => Some(target.size_long_double.get() as u64 * 8),
        Float80 => Some(80),
        Float128 => Some(target.size_float128.get() as u64 * 8),

        ComplexFp16 => Some(target.size_fp16.get() as u64 * 16),
        ComplexFloat => Some(target.size_float.get() as u64 * 16),
        ComplexDouble => Some(target.size_double.get() as u64 * 16),
        ComplexLongDouble => Some(target.size_long_double.get() as u64 * 16),
        ComplexFloat80 => Some(160),
        ComplexFloat128 => Some(target.size_float128.get() as u64 * 16),

        Pointer => Some(target.pointer_width.get() as u64 * 8),

        DecayedArray | DecayedStaticArray | DecayedIncompleteArray | DecayedVariableLenArray
        | DecayedUnspecifiedVariableLenArray => Some(target.pointer_width.get() as u64 * 8),

        Array | StaticArray => {
            let elem = ty.array_elem()?;
            let len = ty.array_len()?;
            let elem_bits = bit_sizeof(elem, target, lang)?;
            let raw = elem_bits * len;
            if target.is_msvc() {
                Some(raw)
            } else {
                let align_bits = alignof(elem, target, lang)? * 8;
                Some(align_up(raw, align_bits))
            }
        }
        Vector => {
            let elem = ty.array_elem()?;
            let len = ty.array_len()?;
            Some(bit_sizeof(elem, target, lang)? * len)
        }
        IncompleteArray => {
            if target.is_msvc() {
                Some(0)
            } else {
                None
            }
        }
        VariableLenArray | DecayedVector | UnspecifiedVariableLenArray => None,

        Func | VarArgsFunc | OldStyleFunc => Some(8),

        Struct | Union => {
            let members = ty.record_members()?;
            Some(*members.size_bits.borrow().as_ref()?)
        }
        Enum => match ty.enum_data() {
            Some(e) if e.is_complete() || e.fixed_underlying.is_some() => {
                let tag = e.fixed_underlying.unwrap_or_else(|| enum_tag_specifier(&ty, lang));
                bit_sizeof(&Type::basic(tag), target, lang)
            }
            _ => None,
        },

        TypeofType | TypeofExpr | DecayedTypeofType | DecayedTypeofExpr | Attributed => {
            unreachable!("canonicalize() strips these")
        }
        SpecialVaStart => Some(target.pointer_width.get() as u64 * 8),
    }
}

fn align_up(value: u64, align: u64) -> u64 {
    if align == 0 {
        value
    } else {
        value.div_ceil(align) * align
    }
}

/// The underlying integer specifier an unfixed enum lays out as: `int`
/// unless `-fshort-enums`/GCC packs it to the smallest fitting type — that
/// refinement needs the enumerator values, which the builder already knows
/// at completion time and records via `fixed_underlying`, so absent a fixed
/// underlying type this engine-side fallback is always plain `int`.
fn enum_tag_specifier(_ty: &Type, _lang: &crate::target::LangOpts) -> Specifier {
    Specifier::Int
}

/// Alignment in bytes.
pub fn alignof(ty: &Type, target: &Target, lang: &crate::target::LangOpts) -> MaybeSize {
    let canonical = canon(ty);
    // Must read off `ty`, not `canonical`: canonicalization strips the
    // `attributed` wrapper before `requested_alignment` ever sees it.
    let requested = requested_alignment(ty, target);

    use Specifier::*;
    let natural = match canonical.specifier() {
        Invalid => return None,
        Pointer => Some(target.pointer_alignment()),
        DecayedArray | DecayedStaticArray | DecayedIncompleteArray | DecayedVariableLenArray
        | DecayedUnspecifiedVariableLenArray => Some(target.pointer_alignment()),
        Int128 | UInt128 | ComplexInt128 | ComplexUInt128 => Some(target.int128_alignment()),
        BitInt | ComplexBitInt => canonical.payload_bit_int().map(|b| {
            let bytes = ((b.bits as u64) + 7) / 8;
            next_pow2(bytes).min(target.max_int_align.get() as u64)
        }),
        Array | StaticArray | Vector => {
            let elem = canonical.array_elem()?;
            alignof(elem, target, lang)
        }
        IncompleteArray | VariableLenArray | UnspecifiedVariableLenArray => {
            let elem = canonical.array_elem()?;
            alignof(elem, target, lang)
        }
        // Storage-size-derived, not bit-size-derived, for the same reason
        // `sizeof` special-cases these (see its doc comment).
        Float80 => Some(target.size_float80.get() as u64),
        Func | VarArgsFunc | OldStyleFunc => Some(target.function_alignment()),
        Struct | Union => canonical
            .record_members()
            .and_then(|m| *m.align_bits.borrow())
            .map(|bits| (bits / 8).max(1)),
        Enum => {
            let tag = canonical.enum_data().and_then(|e| e.fixed_underlying);
            match tag {
                Some(tag) => alignof(&Type::basic(tag), target, lang),
                None if canonical.enum_is_complete() => alignof(&Type::basic(Specifier::Int), target, lang),
                None => None,
            }
        }
        // A complex type's alignment always matches its real companion's,
        // never its own (doubled) size (spec.md §3, §8 invariant 4) — the
        // `__int128`/`_BitInt` complex variants are already folded into
        // their real companion's arm above; this covers the rest.
        s if s.is_complex() => {
            let real = s.make_real().expect("is_complex() implies make_real()");
            alignof(&Type::basic(real), target, lang)
        }
        _ => bit_sizeof(&canonical, target, lang).map(|bits| {
            let bytes = ((bits + 7) / 8).max(1);
            match target.scalar_alignment_cap() {
                Some(cap) => bytes.min(cap),
                None => bytes,
            }
        }),
    };

    // GCC emulation ignores `aligned` on enums (spec.md §4.4); MSVC returns
    // the requested alignment alone for enums/structs/unions rather than
    // taking the max with the computed natural alignment.
    match (requested, natural, canonical.specifier()) {
        (Some(_), _, Enum) if lang.dialect == Dialect::Gcc => natural,
        (Some(r), _, Enum) => Some(r),
        (Some(r), _, _) if target.is_msvc() && (canonical.is_record() || canonical.specifier() == Enum) => Some(r),
        (Some(r), Some(n), _) => Some(r.max(n)),
        (Some(r), None, _) => Some(r),
        (None, n, _) => n,
    }
}

fn next_pow2(v: u64) -> u64 {
    if v <= 1 {
        1
    } else {
        1u64 << (64 - (v - 1).leading_zeros())
    }
}

/// `aligned(N)` from an `attributed` wrapper, unwrapping through `typeof`
/// the way `getAttribute` does (spec.md §4.7).
pub fn requested_alignment(ty: &Type, target: &Target) -> Option<u64> {
    let mut cur = ty.clone();
    loop {
        if let Some(n) = cur.requested_alignment() {
            return Some(if n == 0 {
                target.default_requested_align.get() as u64
            } else {
                n
            });
        }
        if let Some(base) = cur.attributed_base() {
            cur = base.clone();
            continue;
        }
        if matches!(cur.specifier(), Specifier::TypeofType | Specifier::DecayedTypeofType) {
            if let Some(inner) = cur.payload_sub_type() {
                cur = inner.clone();
                continue;
            }
        }
        return None;
    }
}

pub fn size_compare(a: &Type, b: &Type, target: &Target, lang: &crate::target::LangOpts) -> SizeOrdering {
    match (sizeof(a, target, lang), sizeof(b, target, lang)) {
        (Some(x), Some(y)) if x < y => SizeOrdering::Lt,
        (Some(x), Some(y)) if x > y => SizeOrdering::Gt,
        (Some(x), Some(y)) => {
            debug_assert_eq!(x, y);
            SizeOrdering::Eq
        }
        _ => SizeOrdering::Indeterminate,
    }
}

/// `alignable(ty)`: array, complete, or void (spec.md §8 invariant 10 and
/// §4.4's alignment rules only make sense for these).
pub fn alignable(ty: &Type) -> bool {
    let canonical = canon(ty);
    if canonical.specifier() == Specifier::Void || canonical.specifier().is_any_array() {
        return true;
    }
    if canonical.is_record() {
        return canonical.record_is_complete();
    }
    if canonical.specifier() == Specifier::Enum {
        return canonical.enum_is_complete() || canonical.enum_data().and_then(|e| e.fixed_underlying).is_some();
    }
    true
}

/// `_Bool` required alignment under MSVC is the only non-8-bit case spec.md
/// §3 mentions for `TypeLayout.required_alignment_bits`; everything else
/// uses byte alignment (`8`).
pub fn required_alignment_bits(target: &Target) -> u64 {
    if target.is_msvc() {
        8
    } else {
        8
    }
}

/// `minInt(ty)`/`maxInt(ty)` (spec.md §2.7, §6): the smallest/largest value
/// representable by `ty`'s integer width and signedness, including
/// `_BitInt(N)`. `None` for anything that isn't a real integer specifier
/// (bool/char/short/int/long/long long/`__int128`/`_BitInt`).
///
/// Both return `i128`: every width this engine supports (up to 128 bits)
/// fits in a signed value except the single case of an unsigned 128-bit
/// maximum, which `max_int` clamps to `i128::MAX` rather than overflow —
/// there is no wider standard integer type to return instead.
pub fn min_int(ty: &Type, target: &Target) -> Option<i128> {
    let (bits, unsigned) = int_width_and_signedness(&canon(ty), target)?;
    Some(if unsigned { 0 } else { -(1i128 << (bits - 1)) })
}

pub fn max_int(ty: &Type, target: &Target) -> Option<i128> {
    let (bits, unsigned) = int_width_and_signedness(&canon(ty), target)?;
    Some(if bits >= 128 {
        i128::MAX
    } else if unsigned {
        (1i128 << bits) - 1
    } else {
        (1i128 << (bits - 1)) - 1
    })
}

fn int_width_and_signedness(ty: &Type, target: &Target) -> Option<(u32, bool)> {
    use Specifier::*;
    match ty.specifier() {
        Bool => Some((8, true)),
        Char => Some((8, !target.char_is_signed())),
        SChar => Some((8, false)),
        UChar => Some((8, true)),
        Short => Some((target.size_short.get() as u32 * 8, false)),
        UShort => Some((target.size_short.get() as u32 * 8, true)),
        Int => Some((target.size_int.get() as u32 * 8, false)),
        UInt => Some((target.size_int.get() as u32 * 8, true)),
        Long => Some((target.size_long.get() as u32 * 8, false)),
        ULong => Some((target.size_long.get() as u32 * 8, true)),
        LongLong => Some((target.size_long_long.get() as u32 * 8, false)),
        ULongLong => Some((target.size_long_long.get() as u32 * 8, true)),
        Int128 => Some((target.size_int128.get() as u32 * 8, false)),
        UInt128 => Some((target.size_int128.get() as u32 * 8, true)),
        BitInt => ty.payload_bit_int().map(|b| (b.bits as u32, !b.signed)),
        _ => None,
    }
}
