//! Printer & dumper (spec.md §4.9): renders a [`Type`] in C declarator
//! syntax, and a diagnostic dump for debugging.
//!
//! No teacher file models this — IDA's type library never round-trips
//! back to C source text — so this is grounded directly on spec.md §4.9's
//! prologue/epilogue description: C declarators are inside-out (`int
//! (*fp)(void)` reads "fp is a pointer to a function returning int"), so
//! the printer can't walk the type tree once, outer to inner, and emit
//! text in reading order. Instead it builds a *declarator* string
//! outside-in — pointers wrap it in `(*...)`, arrays and functions append
//! `[...]`/`(...)`  after it — while recursing toward the base type, then
//! prints `base-type-text declarator` once recursion bottoms out. This
//! keeps the two-phase structure spec.md's Design Notes (§9) call out as
//! worth preserving rather than inventing an intermediate declarator AST.

use std::fmt::Write as _;

use crate::interner::StringInterner;
use crate::specifier::Specifier;
use crate::target::LangOpts;
use crate::types::{FunctionKind, Type};

/// Prints `ty` as an anonymous C type (abstract declarator), e.g. `int *`.
pub fn print(ty: &Type, interner: &dyn StringInterner, lang: &LangOpts) -> String {
    print_named(ty, None, interner, lang)
}

/// Prints `ty` with a declared name sandwiched into its declarator, e.g.
/// `print_named(int[3], "x", ..)` -> `"int x[3]"`.
pub fn print_named(ty: &Type, name: Option<&str>, interner: &dyn StringInterner, lang: &LangOpts) -> String {
    let mut decl = name.unwrap_or("").to_string();
    let base = build_declarator(ty, &mut decl, interner, lang);
    let base_text = base_type_text(&base, interner, lang);
    if decl.is_empty() {
        base_text
    } else {
        format!("{base_text} {decl}")
    }
}

/// Recurses from `ty` toward its base type, mutating `decl` (the
/// "declarator", initially just the declared name or empty) into its
/// final prologue+epilogue form. Returns the base type whose name the
/// caller should print first.
fn build_declarator(ty: &Type, decl: &mut String, interner: &dyn StringInterner, lang: &LangOpts) -> Type {
    match ty.specifier() {
        Specifier::Pointer => {
            let pointee = ty.pointee().expect("pointer always has pointee").clone();
            wrap_pointer(ty, &pointee, decl);
            build_declarator(&pointee, decl, interner, lang)
        }
        s if s.is_decayed() && !matches!(s, Specifier::DecayedTypeofType | Specifier::DecayedTypeofExpr) => {
            // A decayed array prints exactly like a pointer to its element
            // (spec.md §4.9: "Prologue writes ... `*` ... for pointers/
            // decayed arrays").
            let elem = ty.array_elem().expect("decayed array keeps its element").clone();
            wrap_pointer(ty, &elem, decl);
            build_declarator(&elem, decl, interner, lang)
        }
        Specifier::Attributed => {
            let base = ty.attributed_base().expect("attributed always wraps a base").clone();
            build_declarator(&base, decl, interner, lang)
        }
        s if s.is_any_array() => {
            wrap_array(ty, decl);
            let elem = ty.array_elem().cloned().unwrap_or_else(Type::invalid);
            build_declarator(&elem, decl, interner, lang)
        }
        s if s.is_func() => {
            wrap_func(ty, decl, interner, lang);
            let ret = ty
                .payload_func()
                .map(|f| f.return_type.clone())
                .unwrap_or_else(Type::invalid);
            build_declarator(&ret, decl, interner, lang)
        }
        // `typeof`, vectors, and every scalar/aggregate specifier are leaves
        // for declarator purposes: nothing further to unwrap before the
        // base type's own name is printed.
        _ => ty.clone(),
    }
}

fn wrap_pointer(ptr_ty: &Type, pointee: &Type, decl: &mut String) {
    let needs_parens = pointee.is_func() || pointee.specifier().is_any_array() || pointee.specifier().is_vector();
    let mut s = String::new();
    if needs_parens {
        s.push('(');
    }
    s.push('*');
    let q = ptr_ty.qualifiers();
    if q.is_const() {
        s.push_str("const ");
    }
    if q.is_volatile() {
        s.push_str("volatile ");
    }
    if q.is_restrict() {
        s.push_str("restrict ");
    }
    s.push_str(decl);
    if needs_parens {
        s.push(')');
    }
    *decl = s;
}

fn wrap_array(ty: &Type, decl: &mut String) {
    let mut suffix = String::new();
    suffix.push('[');
    match ty.specifier() {
        Specifier::StaticArray => {
            suffix.push_str("static ");
            if let Some(len) = ty.array_len() {
                let _ = write!(suffix, "{len}");
            }
        }
        Specifier::Array => {
            if let Some(len) = ty.array_len() {
                let _ = write!(suffix, "{len}");
            }
        }
        Specifier::IncompleteArray => {}
        Specifier::UnspecifiedVariableLenArray => suffix.push('*'),
        // A VLA's length is an arbitrary runtime expression this crate
        // never evaluates or prints (spec.md §6: expression nodes are an
        // external collaborator) — render the placeholder the spec's own
        // grammar reserves for it.
        Specifier::VariableLenArray => suffix.push_str("<expr>"),
        _ => {}
    }
    suffix.push(']');
    decl.push_str(&suffix);
}

fn wrap_func(ty: &Type, decl: &mut String, interner: &dyn StringInterner, lang: &LangOpts) {
    let Some(data) = ty.payload_func() else {
        return;
    };
    let mut params = String::from('(');
    if data.params.is_empty() {
        // C-legal empty-list rendering: a prototyped function with zero
        // parameters prints `(void)`; an old-style (K&R) declaration prints
        // a bare `()` since its parameter list is unknown, not empty.
        if !matches!(ty.function_kind(), Some(FunctionKind::OldStyle)) {
            params.push_str("void");
        }
    } else {
        for (i, p) in data.params.iter().enumerate() {
            if i > 0 {
                params.push_str(", ");
            }
            let name = p.name.map(|s| interner.lookup(s));
            params.push_str(&print_named(&p.ty, name, interner, lang));
        }
        if matches!(ty.function_kind(), Some(FunctionKind::VarArgs)) {
            params.push_str(", ...");
        }
    }
    params.push(')');
    decl.push_str(&params);
}

fn base_type_text(ty: &Type, interner: &dyn StringInterner, lang: &LangOpts) -> String {
    let q = ty.qualifiers();
    let mut prefix = String::new();
    if q.is_const() {
        prefix.push_str("const ");
    }
    if q.is_volatile() {
        prefix.push_str("volatile ");
    }
    if q.is_restrict() {
        prefix.push_str("restrict ");
    }

    let core = scalar_or_aggregate_text(ty, interner, lang);
    let core = if q.is_atomic() {
        // `_Atomic(T)` short-circuits the usual qualifier-prefix rendering
        // (spec.md §4.9).
        format!("_Atomic({core})")
    } else {
        core
    };

    format!("{prefix}{core}")
}

fn scalar_or_aggregate_text(ty: &Type, interner: &dyn StringInterner, lang: &LangOpts) -> String {
    use Specifier::*;
    match ty.specifier() {
        Invalid => "<invalid>".to_string(),
        Void => "void".to_string(),
        Bool => "_Bool".to_string(),
        NullptrT => "nullptr_t".to_string(),

        Char => "char".to_string(),
        SChar => "signed char".to_string(),
        UChar => "unsigned char".to_string(),
        Short => "short".to_string(),
        UShort => "unsigned short".to_string(),
        Int => "int".to_string(),
        UInt => "unsigned int".to_string(),
        Long => "long".to_string(),
        ULong => "unsigned long".to_string(),
        LongLong => "long long".to_string(),
        ULongLong => "unsigned long long".to_string(),
        Int128 => "__int128".to_string(),
        UInt128 => "unsigned __int128".to_string(),

        Fp16 => "_Float16".to_string(),
        Float => "float".to_string(),
        Double => "double".to_string(),
        LongDouble => "long double".to_string(),
        Float80 => "__float80".to_string(),
        Float128 => "_Float128".to_string(),

        s if s.is_complex() => {
            let real = s
                .make_real()
                .map(|r| Type::basic(r))
                .unwrap_or_else(|| Type::basic(Specifier::Double));
            format!("_Complex {}", scalar_or_aggregate_text(&real, interner, lang))
        }

        BitInt => {
            let data = ty.payload_bit_int();
            let sign = if data.map(|b| b.signed).unwrap_or(true) { "" } else { "unsigned " };
            format!("{sign}_BitInt({})", data.map(|b| b.bits).unwrap_or(0))
        }

        Vector => {
            // GCC's `vector_size` attribute argument is a byte count, which
            // needs a `Target` this function doesn't take (spec.md §6 lists
            // the printer's inputs as just `mapper`/`langopts`); render the
            // element-count form instead, with a comment spelling out the
            // lane type so a reader can recover the byte count themselves.
            let elem = ty.array_elem().cloned().unwrap_or_else(Type::invalid);
            let len = ty.array_len().unwrap_or(0);
            let elem_text = scalar_or_aggregate_text(&elem, interner, lang);
            format!("{elem_text} __attribute__((vector_size({len}))) /* {len} x {elem_text} lanes */")
        }

        Struct | Union => {
            let keyword = if ty.specifier() == Struct { "struct" } else { "union" };
            format!("{keyword} {}", tag_name(ty, interner))
        }
        Enum => format!("enum {}", tag_name(ty, interner)),

        TypeofType | DecayedTypeofType => {
            let inner = ty.payload_sub_type().cloned().unwrap_or_else(Type::invalid);
            format!("typeof({})", print(&inner, interner, lang))
        }
        TypeofExpr | DecayedTypeofExpr => "typeof(<expr>)".to_string(),

        SpecialVaStart => "__builtin_va_list".to_string(),

        // Pointers, arrays, functions, and `attributed` are all consumed
        // by `build_declarator` before this function ever sees them.
        Pointer | Array | StaticArray | DecayedArray | DecayedStaticArray | IncompleteArray
        | DecayedIncompleteArray | VariableLenArray | DecayedVariableLenArray
        | UnspecifiedVariableLenArray | DecayedUnspecifiedVariableLenArray | DecayedVector
        | Func | VarArgsFunc | OldStyleFunc | Attributed => {
            unreachable!("build_declarator consumes this specifier before reaching base_type_text")
        }
        ComplexChar | ComplexSChar | ComplexUChar | ComplexShort | ComplexUShort | ComplexInt
        | ComplexUInt | ComplexLong | ComplexULong | ComplexLongLong | ComplexULongLong
        | ComplexInt128 | ComplexUInt128 | ComplexFp16 | ComplexFloat | ComplexDouble
        | ComplexLongDouble | ComplexFloat80 | ComplexFloat128 | ComplexBitInt => {
            unreachable!("handled by the `s if s.is_complex()` arm above")
        }
    }
}

fn tag_name(ty: &Type, interner: &dyn StringInterner) -> String {
    match ty.name() {
        Some(sym) => interner.lookup(sym).to_string(),
        None => "(anonymous)".to_string(),
    }
}

/// A one-line-per-node diagnostic dump: specifier, qualifiers, and nested
/// payload shape, independent of C declarator syntax. Used for `-ast-dump`
/// style debugging rather than for regenerating source text.
pub fn dump(ty: &Type, interner: &dyn StringInterner) -> String {
    let mut out = String::new();
    dump_into(ty, 0, &mut out, interner);
    out
}

fn dump_into(ty: &Type, depth: usize, out: &mut String, interner: &dyn StringInterner) {
    let indent = "  ".repeat(depth);
    let q = ty.qualifiers();
    let mut quals = Vec::new();
    if q.is_const() {
        quals.push("const");
    }
    if q.is_volatile() {
        quals.push("volatile");
    }
    if q.is_restrict() {
        quals.push("restrict");
    }
    if q.is_atomic() {
        quals.push("atomic");
    }
    let qual_text = if quals.is_empty() {
        String::new()
    } else {
        format!(" [{}]", quals.join(","))
    };
    let _ = writeln!(out, "{indent}{:?}{qual_text}", ty.specifier());

    if let Some(pointee) = ty.pointee() {
        dump_into(pointee, depth + 1, out, interner);
    } else if let Some(elem) = ty.array_elem() {
        dump_into(elem, depth + 1, out, interner);
    } else if let Some(data) = ty.payload_func() {
        dump_into(&data.return_type, depth + 1, out, interner);
        for p in &data.params {
            dump_into(&p.ty, depth + 1, out, interner);
        }
    } else if let Some(base) = ty.attributed_base() {
        dump_into(base, depth + 1, out, interner);
    }
}
