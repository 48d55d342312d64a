//! Attribute API (spec.md §4.7, §6): the accessor surface a caller uses to
//! recover `__attribute__`-style annotations from a possibly-`typeof`-wrapped
//! type, plus the two dialect-sensitive queries (`annotationAlignment`,
//! `enumIsPacked`) that read them. `withAttributes` itself is just
//! [`crate::types::Type::attributed`] under the name spec.md §6 gives it;
//! this module is the rest of that interface, grounded the same way
//! `layout::requested_alignment` is on the teacher's `TILTypeSizeSolver`:
//! walk through `typeof` wrappers rather than re-deriving a second
//! unwrapping loop per accessor.

use crate::specifier::Specifier;
use crate::target::{LangOpts, Target};
use crate::types::{Attribute, AttributeArgs, AttributeTag, Type};

/// `withAttributes(ty, attrs)`: wraps `ty` in an `attributed` node, merging
/// with any attributes it already carries (spec.md §4.7).
pub fn with_attributes(ty: Type, attrs: Vec<Attribute>) -> Type {
    Type::attributed(ty, attrs)
}

/// `getAttributes(ty)`: the nearest `attributed` node's attribute list,
/// unwrapping through `typeof` (spec.md §4.7: "unwrap through typeof and
/// return the nearest match"). Empty if none is found.
pub fn get_attributes(ty: &Type) -> Vec<Attribute> {
    let mut cur = ty.clone();
    loop {
        if !cur.attributes().is_empty() {
            return cur.attributes().to_vec();
        }
        match cur.specifier() {
            Specifier::TypeofType | Specifier::DecayedTypeofType => match cur.payload_sub_type() {
                Some(inner) => {
                    let inner = inner.clone();
                    cur = inner;
                    continue;
                }
                None => return Vec::new(),
            },
            Specifier::TypeofExpr | Specifier::DecayedTypeofExpr => match cur.expr_payload() {
                Some(e) => {
                    cur = e.ty.clone();
                    continue;
                }
                None => return Vec::new(),
            },
            _ => return Vec::new(),
        }
    }
}

/// `getAttribute(ty, tag)`.
pub fn get_attribute(ty: &Type, tag: AttributeTag) -> Option<Attribute> {
    get_attributes(ty).into_iter().find(|a| a.tag == tag)
}

/// `hasAttribute(ty, tag)`.
pub fn has_attribute(ty: &Type, tag: AttributeTag) -> bool {
    get_attribute(ty, tag).is_some()
}

/// `annotationAlignment(attrs)`: the maximum `aligned(N)` argument among
/// `attrs`, or the target's default requested alignment for a bare
/// `aligned` with no argument (spec.md §4.7).
pub fn annotation_alignment(attrs: &[Attribute], target: &Target) -> Option<u64> {
    attrs
        .iter()
        .filter_map(|a| match a {
            Attribute {
                tag: AttributeTag::Aligned,
                args,
            } => Some(match args {
                AttributeArgs::Int(n) if *n > 0 => *n,
                _ => target.default_requested_align.get() as u64,
            }),
            _ => None,
        })
        .max()
}

/// `enumIsPacked(ty)`: true if `-fshort-enums` is active, the target packs
/// every enum regardless of dialect flags, or `ty` itself carries the
/// `packed` attribute (spec.md §4.7).
pub fn enum_is_packed(ty: &Type, lang: &LangOpts, target: &Target) -> bool {
    lang.short_enums || target.packs_all_enums() || has_attribute(ty, AttributeTag::Packed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{LangOpts, Target};
    use crate::types::Type;

    #[test]
    fn get_attribute_unwraps_through_typeof() {
        let base = Type::attributed(
            Type::basic(Specifier::Int),
            vec![Attribute {
                tag: AttributeTag::Packed,
                args: AttributeArgs::None,
            }],
        );
        let wrapped = Type::typeof_type(base);
        assert!(has_attribute(&wrapped, AttributeTag::Packed));
        assert!(!has_attribute(&wrapped, AttributeTag::Aligned));
    }

    #[test]
    fn annotation_alignment_picks_the_max_and_defaults_bare_aligned() {
        let target = Target::x86_64_linux_gnu();
        let attrs = vec![
            Attribute {
                tag: AttributeTag::Aligned,
                args: AttributeArgs::Int(8),
            },
            Attribute {
                tag: AttributeTag::Aligned,
                args: AttributeArgs::Int(32),
            },
        ];
        assert_eq!(annotation_alignment(&attrs, &target), Some(32));

        let bare = vec![Attribute {
            tag: AttributeTag::Aligned,
            args: AttributeArgs::None,
        }];
        assert_eq!(
            annotation_alignment(&bare, &target),
            Some(target.default_requested_align.get() as u64)
        );
    }

    #[test]
    fn enum_is_packed_short_enums_flag() {
        let target = Target::x86_64_linux_gnu();
        let mut lang = LangOpts::gnu_c17();
        let ty = Type::new_enum(None, None);
        assert!(!enum_is_packed(&ty, &lang, &target));
        lang.short_enums = true;
        assert!(enum_is_packed(&ty, &lang, &target));
    }

    #[test]
    fn enum_is_packed_via_attribute() {
        let target = Target::x86_64_linux_gnu();
        let lang = LangOpts::gnu_c17();
        let ty = Type::attributed(
            Type::new_enum(None, None),
            vec![Attribute {
                tag: AttributeTag::Packed,
                args: AttributeArgs::None,
            }],
        );
        assert!(enum_is_packed(&ty, &lang, &target));
    }

    #[test]
    fn enum_is_packed_on_avr_regardless_of_dialect() {
        let target = Target::avr();
        let lang = LangOpts::gnu_c17();
        let ty = Type::new_enum(None, None);
        assert!(enum_is_packed(&ty, &lang, &target));
    }
}
