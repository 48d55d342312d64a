//! Struct/union field-offset and aggregate size/alignment computation
//! (spec.md §3 `TypeLayout`, §4.4, §5).
//!
//! Grounded on the teacher crate's `til/size_calculator.rs`
//! (`TILTypeSizeSolver`): walk members in declaration order, accumulate a
//! running offset, round up to each member's alignment before placing it,
//! and condense consecutive bitfields into shared allocation units exactly
//! the way `condensate_bitfields_from_struct` does. Generalized from the
//! teacher's byte-granularity walk (IDA's on-disk struct members are never
//! sub-byte except for the bitfield special case it already carves out) to
//! a bit-granularity one, so C bitfields interleave correctly with ordinary
//! fields, and from "structs only" to structs *and* unions sharing one
//! entry point — matching how `types::record` already treats them as one
//! payload shape distinguished only by the outer specifier.
//!
//! Called exactly once per record, by the parser, right after it supplies
//! the member list to [`crate::types::Type::complete_record`] (spec.md §5:
//! "Field `layout` slots within a record are likewise written once, during
//! layout finalization, before any `sizeof`/`alignof` query is allowed").

use crate::layout::{alignof, bit_sizeof};
use crate::specifier::Specifier;
use crate::target::{LangOpts, Target};
use crate::types::{Field, FieldLayout, RecordMembers, Type};

/// Computes every field's `offset_bits`/`size_bits` and the record's own
/// aggregate `size_bits`/`align_bits`, storing them on the payload.
///
/// No-op if `ty` isn't a record or isn't complete yet (the parser calls
/// this right after `complete_record`, so both only happen if misused).
pub fn finalize_record_layout(ty: &Type, target: &Target, lang: &LangOpts) {
    debug_assert!(ty.is_record());
    let Some(data) = ty.record_data() else { return };
    let Some(members) = data.members() else { return };

    if ty.specifier() == Specifier::Union {
        layout_union(&members, target, lang);
    } else {
        layout_struct(&members, target, lang, data.packed);
    }
}

/// A run of bitfields sharing one allocation unit: same underlying type
/// size, packed back-to-back until a field wouldn't fit.
struct BitfieldUnit {
    start_bits: u64,
    unit_bits: u64,
    used_bits: u64,
}

fn layout_struct(members: &RecordMembers, target: &Target, lang: &LangOpts, packed: bool) {
    let mut offset_bits: u64 = 0;
    let mut max_align_bits: u64 = 8;
    let mut unit: Option<BitfieldUnit> = None;

    for field in &members.fields {
        if let Some(width) = field.bit_width {
            let (unit_bits, align_bits) = bitfield_unit_shape(&field.ty, target, lang, packed);
            max_align_bits = max_align_bits.max(align_bits);

            // An unnamed zero-width bitfield (`int : 0;`) consumes no
            // storage but forces the *next* bitfield onto a fresh unit.
            if field.is_unnamed_padding_bitfield() && width == 0 {
                if let Some(u) = unit.take() {
                    offset_bits = u.start_bits + u.unit_bits;
                }
                field.set_layout(FieldLayout {
                    offset_bits,
                    size_bits: 0,
                });
                continue;
            }

            let fits_current = unit
                .as_ref()
                .is_some_and(|u| u.unit_bits == unit_bits && u.used_bits + width as u64 <= u.unit_bits);
            if !fits_current {
                if let Some(u) = unit.take() {
                    offset_bits = u.start_bits + u.unit_bits;
                }
                let start = align_up(offset_bits, align_bits);
                unit = Some(BitfieldUnit {
                    start_bits: start,
                    unit_bits,
                    used_bits: 0,
                });
            }
            let u = unit.as_mut().expect("just populated above");
            let field_offset = u.start_bits + u.used_bits;
            u.used_bits += width as u64;
            field.set_layout(FieldLayout {
                offset_bits: field_offset,
                size_bits: width as u64,
            });
            continue;
        }

        if let Some(u) = unit.take() {
            offset_bits = u.start_bits + u.unit_bits;
        }

        let align_bits = if packed {
            8
        } else {
            field_align_bits(field, target, lang)
        };
        max_align_bits = max_align_bits.max(align_bits);
        let field_offset = align_up(offset_bits, align_bits);
        let field_size = bit_sizeof(&field.ty, target, lang).unwrap_or(0);
        field.set_layout(FieldLayout {
            offset_bits: field_offset,
            size_bits: field_size,
        });
        offset_bits = field_offset + field_size;
    }

    if let Some(u) = unit.take() {
        offset_bits = offset_bits.max(u.start_bits + u.unit_bits);
    }

    let size_bits = if packed {
        offset_bits.max(1)
    } else {
        align_up(offset_bits.max(1), max_align_bits)
    };

    *members.size_bits.borrow_mut() = Some(size_bits);
    *members.align_bits.borrow_mut() = Some(if packed { 8 } else { max_align_bits });
}

fn layout_union(members: &RecordMembers, target: &Target, lang: &LangOpts) {
    let mut max_size_bits: u64 = 0;
    let mut max_align_bits: u64 = 8;

    for field in &members.fields {
        let size_bits = match field.bit_width {
            Some(width) => width as u64,
            None => bit_sizeof(&field.ty, target, lang).unwrap_or(0),
        };
        field.set_layout(FieldLayout {
            offset_bits: 0,
            size_bits,
        });
        max_size_bits = max_size_bits.max(size_bits);
        max_align_bits = max_align_bits.max(field_align_bits(field, target, lang));
    }

    *members.size_bits.borrow_mut() = Some(align_up(max_size_bits.max(1), max_align_bits));
    *members.align_bits.borrow_mut() = Some(max_align_bits);
}

/// A bitfield's allocation unit is its declared type's size; its alignment
/// is that type's natural alignment, except AVR and ARMv7-iOS ignore a
/// non-zero-width bitfield's type alignment entirely and pack byte-tight
/// (spec.md §4.4; `Target::ignore_nonzero_bitfield_type_alignment`).
fn bitfield_unit_shape(ty: &Type, target: &Target, lang: &LangOpts, packed: bool) -> (u64, u64) {
    let unit_bits = bit_sizeof(ty, target, lang).unwrap_or(32);
    let align_bits = if packed || target.ignore_nonzero_bitfield_type_alignment() {
        8
    } else {
        alignof(ty, target, lang).unwrap_or(1) * 8
    };
    (unit_bits, align_bits)
}

/// A field's own `aligned(N)` overrides (never shrinks, C only lets it
/// widen) its type's natural alignment — same `annotationAlignment` rule
/// spec.md §4.7/§6 applies to a whole type, here read off the field's own
/// `field_attributes?` slot instead of the type's.
fn field_align_bits(field: &Field, target: &Target, lang: &LangOpts) -> u64 {
    let natural = alignof(&field.ty, target, lang).unwrap_or(1) * 8;
    match crate::attributes::annotation_alignment(&field.attributes, target) {
        Some(requested) => natural.max(requested * 8),
        None => natural,
    }
}

fn align_up(value: u64, align: u64) -> u64 {
    if align == 0 {
        value
    } else {
        value.div_ceil(align) * align
    }
}
