//! End-to-end tests exercising the engine the way a parser would: drive
//! [`crate::builder::SpecifierBuilder`] through a token sequence, `finish`
//! it into a [`crate::types::Type`], then query its shape and layout.
//! Covers spec.md §8's worked scenarios and cross-cutting invariants.

use rstest::rstest;

use crate::builder::{AtomicSpec, SpecifierBuilder};
use crate::canonicalize::{canonicalize, CanonicalMode};
use crate::diagnostics::{DiagnosticKind, RecordingSink};
use crate::equality::eql;
use crate::interner::SimpleInterner;
use crate::layout::{alignof, bit_sizeof, sizeof};
use crate::qualifiers::Qualifiers;
use crate::queries;
use crate::record_layout::finalize_record_layout;
use crate::specifier::Specifier;
use crate::target::{LangOpts, Target};
use crate::types::{Attribute, AttributeArgs, AttributeTag, Field, FunctionKind, Param, Type};
use crate::{AstNodeId, SourceToken};

fn tok() -> SourceToken {
    SourceToken(1)
}

fn build(specs: &[AtomicSpec], lang: &LangOpts) -> (Type, RecordingSink) {
    let target = Target::x86_64_linux_gnu();
    let mut b = SpecifierBuilder::new();
    let mut sink = RecordingSink::new();
    for s in specs {
        let _ = b.combine(*s, tok(), lang, &mut sink);
    }
    let ty = b.finish(&target, lang, tok(), &mut sink);
    (ty, sink)
}

// --- spec.md §8 scenario 1 -------------------------------------------
#[test]
fn scenario_signed_long_long_int_const() {
    let lang = LangOpts::gnu_c17();
    let target = Target::x86_64_linux_gnu();
    let mut b = SpecifierBuilder::new();
    let mut sink = RecordingSink::new();
    b.combine(AtomicSpec::Signed, tok(), &lang, &mut sink).unwrap();
    b.combine(AtomicSpec::Long, tok(), &lang, &mut sink).unwrap();
    b.combine(AtomicSpec::Long, tok(), &lang, &mut sink).unwrap();
    b.combine(AtomicSpec::Int, tok(), &lang, &mut sink).unwrap();
    b.qualifiers_mut().add_const(tok());
    let ty = b.finish(&target, &lang, tok(), &mut sink);

    assert_eq!(ty.specifier(), Specifier::LongLong);
    assert!(ty.qualifiers().is_const());
    assert_eq!(sizeof(&ty, &target, &lang), Some(8));
    assert_eq!(alignof(&ty, &target, &lang), Some(8));
    assert!(sink.is_empty());
}

// --- spec.md §8 scenario 2 -------------------------------------------
#[test]
fn scenario_complex_unsigned_short() {
    let lang = LangOpts::gnu_c17();
    let target = Target::x86_64_linux_gnu();
    let (ty, sink) = build(&[AtomicSpec::Complex, AtomicSpec::Unsigned, AtomicSpec::Short], &lang);

    assert_eq!(ty.specifier(), Specifier::ComplexUShort);
    assert_eq!(sizeof(&ty, &target, &lang), Some(4));
    assert_eq!(alignof(&ty, &target, &lang), Some(2));
    assert!(queries::is_int(&ty));
    assert!(queries::is_complex(&ty));
    assert!(sink.kinds().any(|k| k == DiagnosticKind::ComplexInt));

    let real = ty.specifier().make_real().unwrap();
    assert_eq!(real, Specifier::UShort);
}

// --- spec.md §8 scenario 3 -------------------------------------------
#[rstest]
#[case(0, false, DiagnosticKind::UnsignedBitIntTooSmall)]
#[case(1, true, DiagnosticKind::SignedBitIntTooSmall)]
#[case(129, true, DiagnosticKind::BitIntTooBig)]
fn scenario_bit_int_bounds(#[case] bits: u32, #[case] signed: bool, #[case] expect: DiagnosticKind) {
    let lang = LangOpts::gnu_c17();
    let target = Target::x86_64_linux_gnu();
    let mut b = SpecifierBuilder::new();
    let mut sink = RecordingSink::new();
    if !signed {
        b.combine(AtomicSpec::Unsigned, tok(), &lang, &mut sink).unwrap();
    }
    b.combine_bit_int(bits, tok(), &mut sink).unwrap();
    let _ty = b.finish(&target, &lang, tok(), &mut sink);
    assert!(
        sink.kinds().any(|k| k == expect),
        "expected {expect:?} in {:?}",
        sink.kinds().collect::<Vec<_>>()
    );
}

// --- spec.md §8 scenario 4 -------------------------------------------
#[test]
fn scenario_array_decay_round_trip() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let array = Type::array(Type::basic(Specifier::Int), 5);
    assert_eq!(array.specifier(), Specifier::Array);

    let decayed = array.with_decayed_specifier();
    assert_eq!(decayed.specifier(), Specifier::DecayedArray);
    assert_eq!(sizeof(&decayed, &target, &lang), Some(8));
    assert_eq!(queries::elem_type(&decayed).specifier(), Specifier::Int);

    let restored = decayed.with_undecayed_specifier();
    assert_eq!(restored.specifier(), Specifier::Array);
    assert_eq!(restored.array_len(), Some(5));
}

// --- spec.md §8 scenario 5 -------------------------------------------
#[test]
fn scenario_typeof_const_array_propagates_qualifier_to_element() {
    let inner = Type::array(Type::basic(Specifier::Int), 4).with_qualifiers(Qualifiers::NONE.with_const(true));
    let typeof_ty = Type::typeof_type(inner);

    let elem = queries::elem_type(&typeof_ty);
    assert_eq!(elem.specifier(), Specifier::Int);
    assert!(elem.qualifiers().is_const());
}

// --- spec.md §8 scenario 6 -------------------------------------------
#[test]
fn scenario_i586_long_long_size_and_align_diverge() {
    let lang = LangOpts::gnu_c17();
    let target = Target::i586_linux_gnu();
    let ty = Type::basic(Specifier::LongLong);
    assert_eq!(sizeof(&ty, &target, &lang), Some(8));
    assert_eq!(alignof(&ty, &target, &lang), Some(4));
}

#[test]
fn scenario_armv7_ios_char_signed_and_bitfield_alignment_ignored() {
    let target = Target::armv7_ios();
    assert!(target.char_is_signed());
    assert!(target.ignore_nonzero_bitfield_type_alignment());
}

// --- invariant: canonicalize terminates and preserves predicate results
#[test]
fn canonicalize_preserves_predicates_through_typeof_chain() {
    let base = Type::basic(Specifier::Int);
    let wrapped = Type::typeof_type(Type::typeof_type(base.clone()));
    assert_eq!(queries::is_int(&wrapped), queries::is_int(&base));
    assert_eq!(canonicalize(&wrapped, CanonicalMode::Standard).specifier(), Specifier::Int);
}

// --- invariant: real<->complex round trip (engine-level, via queries)
#[rstest]
#[case(Specifier::Int)]
#[case(Specifier::UChar)]
#[case(Specifier::Double)]
#[case(Specifier::Float128)]
fn real_complex_round_trip(#[case] real: Specifier) {
    let complex = real.make_complex().unwrap();
    assert_eq!(complex.make_real().unwrap(), real);
}

// --- invariant: sizeof/alignof of complex X vs real X (spec.md §8 invariant 4)
#[rstest]
#[case(Specifier::Int)]
#[case(Specifier::Short)]
#[case(Specifier::Long)]
#[case(Specifier::Float)]
#[case(Specifier::Double)]
#[case(Specifier::Float80)]
fn complex_size_is_double_align_matches_real(#[case] real: Specifier) {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let complex = real.make_complex().unwrap();

    let real_size = sizeof(&Type::basic(real), &target, &lang).unwrap();
    let complex_size = sizeof(&Type::basic(complex), &target, &lang).unwrap();
    assert_eq!(complex_size, real_size * 2);

    let real_align = alignof(&Type::basic(real), &target, &lang).unwrap();
    let complex_align = alignof(&Type::basic(complex), &target, &lang).unwrap();
    assert_eq!(complex_align, real_align);
}

// --- invariant: bitSizeof == 8*sizeof except the documented exceptions
#[test]
fn bit_sizeof_matches_8x_sizeof_for_int_and_pointer() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let int_ty = Type::basic(Specifier::Int);
    assert_eq!(bit_sizeof(&int_ty, &target, &lang), sizeof(&int_ty, &target, &lang).map(|b| b * 8));

    let ptr = Type::pointer(Type::basic(Specifier::Int));
    assert_eq!(bit_sizeof(&ptr, &target, &lang), sizeof(&ptr, &target, &lang).map(|b| b * 8));
}

// --- invariant: float80's bit size (x87 payload) and byte size (padded
// storage slot) diverge from the usual 8*sizeof relationship (spec.md
// invariant 5; §4.4's storage-vs-bit-width distinction).
#[test]
fn float80_byte_size_is_storage_width_not_ceil_of_bit_size() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let ty = Type::basic(Specifier::Float80);
    assert_eq!(bit_sizeof(&ty, &target, &lang), Some(80));
    assert_eq!(sizeof(&ty, &target, &lang), Some(16));
    assert_eq!(alignof(&ty, &target, &lang), Some(16));

    let complex = Type::basic(Specifier::ComplexFloat80);
    assert_eq!(bit_sizeof(&complex, &target, &lang), Some(160));
    assert_eq!(sizeof(&complex, &target, &lang), Some(32));
    assert_eq!(alignof(&complex, &target, &lang), Some(16));
}

#[test]
fn bool_bit_size_is_one_bit_except_msvc() {
    let lang = LangOpts::gnu_c17();
    let gnu_target = Target::x86_64_linux_gnu();
    let ty = Type::basic(Specifier::Bool);
    assert_eq!(bit_sizeof(&ty, &gnu_target, &lang), Some(1));

    let msvc_lang = LangOpts::msvc();
    let msvc_target = Target::x86_64_windows_msvc();
    assert_eq!(bit_sizeof(&ty, &msvc_target, &msvc_lang), Some(8));
}

// --- invariant: complete scalar size is a multiple of its alignment
#[rstest]
#[case(Specifier::Int)]
#[case(Specifier::Short)]
#[case(Specifier::LongLong)]
#[case(Specifier::Double)]
#[case(Specifier::LongDouble)]
fn size_is_multiple_of_align(#[case] spec: Specifier) {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let ty = Type::basic(spec);
    let size = sizeof(&ty, &target, &lang).unwrap();
    let align = alignof(&ty, &target, &lang).unwrap();
    assert_eq!(size % align, 0);
}

// --- invariant: eql is reflexive and respects check_qualifiers
#[test]
fn eql_reflexive_and_qualifier_gated() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let plain = Type::basic(Specifier::Int);
    let constant = plain.clone().with_qualifiers(Qualifiers::NONE.with_const(true));

    assert!(eql(&plain, &plain, &target, &lang, true));
    assert!(eql(&constant, &constant, &target, &lang, true));
    assert!(!eql(&plain, &constant, &target, &lang, true));
    assert!(eql(&plain, &constant, &target, &lang, false));
}

#[test]
fn eql_pointer_compares_pointee() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let p1 = Type::pointer(Type::basic(Specifier::Int));
    let p2 = Type::pointer(Type::basic(Specifier::Int));
    let p3 = Type::pointer(Type::basic(Specifier::Char));
    assert!(eql(&p1, &p2, &target, &lang, true));
    assert!(!eql(&p1, &p3, &target, &lang, true));
}

#[test]
fn eql_function_ignores_top_level_param_cv() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let int_ty = Type::basic(Specifier::Int);
    let const_int = int_ty.clone().with_qualifiers(Qualifiers::NONE.with_const(true));
    let f1 = Type::func(
        FunctionKind::Prototyped,
        int_ty.clone(),
        vec![Param {
            ty: int_ty.clone(),
            name: None,
            name_tok: None,
        }],
    );
    let f2 = Type::func(
        FunctionKind::Prototyped,
        int_ty.clone(),
        vec![Param {
            ty: const_int,
            name: None,
            name_tok: None,
        }],
    );
    assert!(eql(&f1, &f2, &target, &lang, true));
}

// --- invariant: isScalar <=> isInt | isFloat | isPtr | nullptr_t
#[rstest]
#[case(Specifier::Int, true)]
#[case(Specifier::Double, true)]
#[case(Specifier::NullptrT, true)]
#[case(Specifier::Void, false)]
fn scalar_predicate_matches_definition(#[case] spec: Specifier, #[case] expect: bool) {
    let ty = Type::basic(spec);
    assert_eq!(queries::is_scalar(&ty), expect);
    assert_eq!(
        queries::is_scalar(&ty),
        queries::is_int(&ty) || queries::is_float(&ty) || queries::is_ptr(&ty) || queries::is_nullptr_t(&ty)
    );
}

#[test]
fn incomplete_struct_is_not_scalar_but_pointer_is() {
    let incomplete = Type::new_record(Specifier::Struct, None, false);
    assert!(!queries::is_scalar(&incomplete));
    let ptr = Type::pointer(Type::basic(Specifier::Int));
    assert!(queries::is_scalar(&ptr));
}

// --- invariant: integer promotion is idempotent on already-promoted types
#[rstest]
#[case(Specifier::Char)]
#[case(Specifier::Bool)]
#[case(Specifier::Short)]
#[case(Specifier::Int)]
#[case(Specifier::Long)]
fn integer_promotion_is_idempotent(#[case] spec: Specifier) {
    let target = Target::x86_64_linux_gnu();
    let once = queries::integer_promotion(&Type::basic(spec), &target);
    let twice = queries::integer_promotion(&once, &target);
    assert_eq!(once.specifier(), twice.specifier());
}

#[test]
fn ushort_promotes_to_plain_int_when_wider_than_short() {
    let target = Target::x86_64_linux_gnu();
    // On x86_64, short (2 bytes) != int (4 bytes), so ushort promotes to
    // plain int rather than uint (spec.md §4.3).
    let promoted = queries::integer_promotion(&Type::basic(Specifier::UShort), &target);
    assert_eq!(promoted.specifier(), Specifier::Int);
}

// --- struct/union layout: record_layout.rs carries its own focused unit
// tests; these exercise the full builder->layout path end to end.
#[test]
fn struct_with_trailing_tail_padding_rounds_up_to_alignment() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let ty = Type::new_record(Specifier::Struct, None, false);
    ty.complete_record(vec![
        Field::new(None, Type::basic(Specifier::Int), None),
        Field::new(None, Type::basic(Specifier::Char), None),
    ]);
    finalize_record_layout(&ty, &target, &lang);
    // { int; char; } is 8 bytes on x86_64 (4-byte alignment, 5 bytes used,
    // rounded up to the next multiple of 4).
    assert_eq!(sizeof(&ty, &target, &lang), Some(8));
    assert_eq!(alignof(&ty, &target, &lang), Some(4));
}

#[test]
fn incomplete_struct_has_unknown_size_and_align() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let ty = Type::new_record(Specifier::Struct, None, false);
    assert_eq!(sizeof(&ty, &target, &lang), None);
    assert_eq!(alignof(&ty, &target, &lang), None);
}

// --- array/vector/wasm32 edge cases
#[test]
fn int128_supported_on_wasm32_despite_32_bit_pointers() {
    let target = Target::wasm32();
    assert_eq!(target.pointer_width.get(), 4);
    assert!(target.supports_int128());
}

#[test]
fn int128_rejected_on_other_32_bit_targets() {
    let target = Target::i586_linux_gnu();
    assert!(!target.supports_int128());
}

#[test]
fn avr_pointer_alignment_is_one_even_through_typeof() {
    let target = Target::avr();
    let lang = LangOpts::gnu_c17();
    let ptr = Type::pointer(Type::basic(Specifier::Int));
    let wrapped = Type::typeof_type(ptr.clone());
    assert_eq!(alignof(&ptr, &target, &lang), Some(1));
    assert_eq!(alignof(&wrapped, &target, &lang), Some(1));
    let elem = queries::elem_type(&wrapped);
    assert_eq!(elem.specifier(), Specifier::Int);
}

// --- printer
#[test]
fn printer_renders_pointer_to_function_returning_int() {
    let lang = LangOpts::gnu_c17();
    let interner = SimpleInterner::new();
    let func = Type::func(FunctionKind::Prototyped, Type::basic(Specifier::Int), vec![]);
    let ptr = Type::pointer(func);
    let text = crate::printer::print_named(&ptr, Some("fp"), &interner, &lang);
    assert_eq!(text, "int (*fp)(void)");
}

#[test]
fn printer_renders_array_of_pointers() {
    let lang = LangOpts::gnu_c17();
    let interner = SimpleInterner::new();
    let arr = Type::array(Type::pointer(Type::basic(Specifier::Int)), 3);
    let text = crate::printer::print_named(&arr, Some("a"), &interner, &lang);
    assert_eq!(text, "int *a[3]");
}

#[test]
fn printer_renders_const_qualified_pointer() {
    let lang = LangOpts::gnu_c17();
    let interner = SimpleInterner::new();
    let ptr = Type::pointer(Type::basic(Specifier::Int)).with_qualifiers(Qualifiers::NONE.with_const(true));
    let text = crate::printer::print_named(&ptr, Some("p"), &interner, &lang);
    assert_eq!(text, "int *const p");
}

#[test]
fn printer_renders_bit_int() {
    let lang = LangOpts::gnu_c17();
    let interner = SimpleInterner::new();
    let ty = Type::bit_int(17, false, false);
    let text = crate::printer::print(&ty, &interner, &lang);
    assert_eq!(text, "unsigned _BitInt(17)");
}

#[test]
fn dump_renders_pointer_to_const_qualified_function_param() {
    let interner = SimpleInterner::new();
    let const_int = Type::basic(Specifier::Int).with_qualifiers(Qualifiers::NONE.with_const(true));
    let func = Type::func(
        FunctionKind::Prototyped,
        Type::basic(Specifier::Void),
        vec![Param {
            ty: const_int,
            name: None,
            name_tok: None,
        }],
    );
    let ty = Type::pointer(func);
    insta::assert_snapshot!(crate::printer::dump(&ty, &interner));
}

#[test]
fn printer_renders_vla_placeholder() {
    let lang = LangOpts::gnu_c17();
    let interner = SimpleInterner::new();
    let vla = Type::variable_len_array(AstNodeId(0), Type::basic(Specifier::Int));
    let text = crate::printer::print(&vla, &interner, &lang);
    assert_eq!(text, "int [<expr>]");
}

// --- attributed types: `aligned(N)` and its dialect-specific enum exception
#[test]
fn aligned_attribute_raises_struct_alignment() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let ty = Type::new_record(Specifier::Struct, None, false);
    ty.complete_record(vec![Field::new(None, Type::basic(Specifier::Char), None)]);
    finalize_record_layout(&ty, &target, &lang);
    assert_eq!(alignof(&ty, &target, &lang), Some(1));

    let attributed = Type::attributed(
        ty,
        vec![Attribute {
            tag: AttributeTag::Aligned,
            args: AttributeArgs::Int(16),
        }],
    );
    assert_eq!(alignof(&attributed, &target, &lang), Some(16));
}

// --- bare `__attribute__((aligned))` with no argument defaults to the
// target's default requested alignment, same as the per-field accessor
// `attributes::annotation_alignment` already does (spec.md §4.7).
#[test]
fn bare_aligned_attribute_uses_target_default() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let ty = Type::new_record(Specifier::Struct, None, false);
    ty.complete_record(vec![Field::new(None, Type::basic(Specifier::Char), None)]);
    finalize_record_layout(&ty, &target, &lang);

    let attributed = Type::attributed(
        ty,
        vec![Attribute {
            tag: AttributeTag::Aligned,
            args: AttributeArgs::None,
        }],
    );
    assert_eq!(
        alignof(&attributed, &target, &lang),
        Some(target.default_requested_align.get() as u64)
    );
}

// --- minInt/maxInt (spec.md §2.7, §6)
#[rstest]
#[case(Specifier::Char, -128, 127)]
#[case(Specifier::UChar, 0, 255)]
#[case(Specifier::Short, -32768, 32767)]
#[case(Specifier::Int, i32::MIN as i128, i32::MAX as i128)]
#[case(Specifier::UInt, 0, u32::MAX as i128)]
fn min_max_int_for_basic_specifiers(#[case] spec: Specifier, #[case] min: i128, #[case] max: i128) {
    let target = Target::x86_64_linux_gnu();
    let ty = Type::basic(spec);
    assert_eq!(crate::layout::min_int(&ty, &target), Some(min));
    assert_eq!(crate::layout::max_int(&ty, &target), Some(max));
}

#[test]
fn min_max_int_for_bit_int() {
    let target = Target::x86_64_linux_gnu();
    let signed = Type::bit_int(5, true, false);
    assert_eq!(crate::layout::min_int(&signed, &target), Some(-16));
    assert_eq!(crate::layout::max_int(&signed, &target), Some(15));

    let unsigned = Type::bit_int(5, false, false);
    assert_eq!(crate::layout::min_int(&unsigned, &target), Some(0));
    assert_eq!(crate::layout::max_int(&unsigned, &target), Some(31));
}

#[test]
fn min_max_int_none_for_non_integer() {
    let target = Target::x86_64_linux_gnu();
    assert_eq!(crate::layout::min_int(&Type::basic(Specifier::Double), &target), None);
}

#[test]
fn gcc_ignores_aligned_attribute_on_enums_but_clang_does_not() {
    let target = Target::x86_64_linux_gnu();
    let gcc = LangOpts::gnu_c17();
    let clang = LangOpts::clang_c23();

    let enum_ty = Type::new_enum(None, None);
    enum_ty.complete_enum(vec![]);
    let attributed = Type::attributed(
        enum_ty,
        vec![Attribute {
            tag: AttributeTag::Aligned,
            args: AttributeArgs::Int(16),
        }],
    );

    assert_ne!(alignof(&attributed, &target, &gcc), Some(16));
    assert_eq!(alignof(&attributed, &target, &clang), Some(16));
}

// --- attribute API end-to-end (spec.md §4.7, §6)
#[test]
fn annotation_alignment_matches_what_layout_actually_applies() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let attrs = vec![Attribute {
        tag: AttributeTag::Aligned,
        args: AttributeArgs::Int(32),
    }];
    let attributed = crate::attributes::with_attributes(Type::basic(Specifier::Int), attrs.clone());

    assert_eq!(
        crate::attributes::annotation_alignment(&attrs, &target),
        Some(32),
    );
    assert_eq!(alignof(&attributed, &target, &lang), Some(32));
    assert!(crate::attributes::has_attribute(&attributed, AttributeTag::Aligned));
    assert!(!crate::attributes::has_attribute(&attributed, AttributeTag::Packed));
}

#[test]
fn packed_attribute_is_visible_through_has_attribute_and_enum_is_packed() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let enum_ty = Type::new_enum(None, None);
    enum_ty.complete_enum(vec![]);
    let packed_enum = crate::attributes::with_attributes(
        enum_ty,
        vec![Attribute {
            tag: AttributeTag::Packed,
            args: AttributeArgs::None,
        }],
    );
    assert!(crate::attributes::enum_is_packed(&packed_enum, &lang, &target));

    let plain_enum = Type::new_enum(None, None);
    plain_enum.complete_enum(vec![]);
    assert!(!crate::attributes::enum_is_packed(&plain_enum, &lang, &target));
}

// --- `finish` merges the builder's own qualifiers into a typedef's rather
// than overwriting them: `typedef const int CI; CI x;` must keep `const`.
#[test]
fn finish_merges_qualifiers_onto_a_qualified_typedef_instead_of_overwriting() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let typedef_ty = Type::basic(Specifier::Int).with_qualifiers(Qualifiers::NONE.with_const(true));

    let mut b = SpecifierBuilder::new();
    let mut sink = RecordingSink::new();
    b.combine_typedef(typedef_ty, tok(), &mut sink).unwrap();
    let ty = b.finish(&target, &lang, tok(), &mut sink);

    assert!(ty.qualifiers().is_const());
    assert!(sink.is_empty());
}

#[test]
fn finish_unions_builder_qualifiers_with_typedefs_own() {
    let target = Target::x86_64_linux_gnu();
    let lang = LangOpts::gnu_c17();
    let typedef_ty = Type::basic(Specifier::Int).with_qualifiers(Qualifiers::NONE.with_const(true));

    let mut b = SpecifierBuilder::new();
    let mut sink = RecordingSink::new();
    b.combine_typedef(typedef_ty, tok(), &mut sink).unwrap();
    b.qualifiers_mut().add_volatile(tok());
    let ty = b.finish(&target, &lang, tok(), &mut sink);

    assert!(ty.qualifiers().is_const());
    assert!(ty.qualifiers().is_volatile());
}
