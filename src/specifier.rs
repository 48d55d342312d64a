//! Specifier enumeration: the closed tag set naming every type shape the
//! engine can represent (spec.md §3, §2.2).
//!
//! Decayed array/typeof variants are placed immediately after the variant
//! they decay from, so `decayed = original as u8 + 1` — spec.md §9 calls
//! this out as "a space optimization implementers should encode as a helper
//! rather than relying on enum ordinal arithmetic directly", which is what
//! [`Specifier::decay`]/[`Specifier::undecay`] do. `num_enum` gives us the
//! `u8` round-trip those helpers need without a hand-written `match`.

use num_enum::{IntoPrimitive, TryFromPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Specifier {
    Invalid = 0,
    Void,
    Bool,
    NullptrT,

    // --- real integers (13) ---
    Char,
    SChar,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Int128,
    UInt128,

    // --- complex integers (13), offset +13 from their real companion ---
    ComplexChar,
    ComplexSChar,
    ComplexUChar,
    ComplexShort,
    ComplexUShort,
    ComplexInt,
    ComplexUInt,
    ComplexLong,
    ComplexULong,
    ComplexLongLong,
    ComplexULongLong,
    ComplexInt128,
    ComplexUInt128,

    // --- bit-precise integers, handled specially (not by fixed offset) ---
    BitInt,
    ComplexBitInt,

    // --- real floats (6) ---
    Fp16,
    Float,
    Double,
    LongDouble,
    Float80,
    Float128,

    // --- complex floats (6), offset +6 from their real companion ---
    ComplexFp16,
    ComplexFloat,
    ComplexDouble,
    ComplexLongDouble,
    ComplexFloat80,
    ComplexFloat128,

    // --- pointers ---
    Pointer,

    // --- arrays: each kind immediately followed by its decayed twin ---
    Array,
    DecayedArray,
    StaticArray,
    DecayedStaticArray,
    IncompleteArray,
    DecayedIncompleteArray,
    VariableLenArray,
    DecayedVariableLenArray,
    UnspecifiedVariableLenArray,
    DecayedUnspecifiedVariableLenArray,
    Vector,
    DecayedVector,

    // --- functions ---
    Func,
    VarArgsFunc,
    OldStyleFunc,

    // --- aggregates ---
    Struct,
    Union,
    Enum,

    // --- reference wrappers ---
    TypeofType,
    DecayedTypeofType,
    TypeofExpr,
    DecayedTypeofExpr,
    Attributed,

    // --- internal ---
    SpecialVaStart,
}

impl Specifier {
    fn tag(self) -> u8 {
        self.into()
    }

    fn from_tag(tag: u8) -> Specifier {
        Specifier::try_from_primitive(tag).expect("tag produced by decay/undecay is always valid")
    }

    /// Every array/typeof specifier that has a decayed twin.
    pub fn is_decayable(self) -> bool {
        use Specifier::*;
        matches!(
            self,
            Array
                | StaticArray
                | IncompleteArray
                | VariableLenArray
                | UnspecifiedVariableLenArray
                | Vector
                | TypeofType
                | TypeofExpr
        )
    }

    /// True for the "already decayed" half of a decayable pair. Asserts (in
    /// the sense of the invariant spec.md §3 describes) that no stray tag
    /// claims to be decayed without actually being the `+1` twin of a
    /// decayable specifier.
    pub fn is_decayed(self) -> bool {
        use Specifier::*;
        let decayed = matches!(
            self,
            DecayedArray
                | DecayedStaticArray
                | DecayedIncompleteArray
                | DecayedVariableLenArray
                | DecayedUnspecifiedVariableLenArray
                | DecayedVector
                | DecayedTypeofType
                | DecayedTypeofExpr
        );
        if decayed {
            debug_assert!(Specifier::from_tag(self.tag() - 1).is_decayable());
        }
        decayed
    }

    /// Bumps an array/typeof specifier's tag to its decayed twin.
    pub fn decay(self) -> Specifier {
        assert!(self.is_decayable(), "{self:?} has no decayed form");
        Specifier::from_tag(self.tag() + 1)
    }

    /// Reverses [`Specifier::decay`].
    pub fn undecay(self) -> Specifier {
        assert!(self.is_decayed(), "{self:?} is not a decayed specifier");
        Specifier::from_tag(self.tag() - 1)
    }

    pub fn is_real_integer(self) -> bool {
        use Specifier::*;
        matches!(
            self,
            Char | SChar | UChar | Short | UShort | Int | UInt | Long | ULong | LongLong
                | ULongLong | Int128 | UInt128
        )
    }

    pub fn is_complex_integer(self) -> bool {
        use Specifier::*;
        matches!(
            self,
            ComplexChar
                | ComplexSChar
                | ComplexUChar
                | ComplexShort
                | ComplexUShort
                | ComplexInt
                | ComplexUInt
                | ComplexLong
                | ComplexULong
                | ComplexLongLong
                | ComplexULongLong
                | ComplexInt128
                | ComplexUInt128
        )
    }

    pub fn is_real_float(self) -> bool {
        use Specifier::*;
        matches!(self, Fp16 | Float | Double | LongDouble | Float80 | Float128)
    }

    pub fn is_complex_float(self) -> bool {
        use Specifier::*;
        matches!(
            self,
            ComplexFp16
                | ComplexFloat
                | ComplexDouble
                | ComplexLongDouble
                | ComplexFloat80
                | ComplexFloat128
        )
    }

    pub fn is_complex(self) -> bool {
        self.is_complex_integer() || self.is_complex_float() || self == Specifier::ComplexBitInt
    }

    /// The real companion of a complex specifier, via the fixed offsets
    /// spec.md §4.8/§9 describe (+13 for integers, +6 for floats), with
    /// `_BitInt` handled as the special case the spec calls out.
    pub fn make_real(self) -> Option<Specifier> {
        if self == Specifier::ComplexBitInt {
            return Some(Specifier::BitInt);
        }
        if self.is_complex_integer() {
            return Some(Specifier::from_tag(self.tag() - 13));
        }
        if self.is_complex_float() {
            return Some(Specifier::from_tag(self.tag() - 6));
        }
        None
    }

    /// The complex companion of a real specifier; inverse of [`Self::make_real`].
    pub fn make_complex(self) -> Option<Specifier> {
        if self == Specifier::BitInt {
            return Some(Specifier::ComplexBitInt);
        }
        if self.is_real_integer() {
            return Some(Specifier::from_tag(self.tag() + 13));
        }
        if self.is_real_float() {
            return Some(Specifier::from_tag(self.tag() + 6));
        }
        None
    }

    pub fn is_any_array(self) -> bool {
        use Specifier::*;
        matches!(
            self,
            Array
                | DecayedArray
                | StaticArray
                | DecayedStaticArray
                | IncompleteArray
                | DecayedIncompleteArray
                | VariableLenArray
                | DecayedVariableLenArray
                | UnspecifiedVariableLenArray
                | DecayedUnspecifiedVariableLenArray
        )
    }

    pub fn is_vector(self) -> bool {
        matches!(self, Specifier::Vector | Specifier::DecayedVector)
    }

    pub fn is_func(self) -> bool {
        matches!(
            self,
            Specifier::Func | Specifier::VarArgsFunc | Specifier::OldStyleFunc
        )
    }

    pub fn is_typeof(self) -> bool {
        matches!(
            self,
            Specifier::TypeofType
                | Specifier::DecayedTypeofType
                | Specifier::TypeofExpr
                | Specifier::DecayedTypeofExpr
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_round_trips_every_array_kind() {
        for s in [
            Specifier::Array,
            Specifier::StaticArray,
            Specifier::IncompleteArray,
            Specifier::VariableLenArray,
            Specifier::UnspecifiedVariableLenArray,
            Specifier::Vector,
        ] {
            let decayed = s.decay();
            assert!(decayed.is_decayed());
            assert_eq!(decayed.undecay(), s);
            assert_eq!(decayed.tag(), s.tag() + 1);
        }
    }

    #[test]
    fn decay_round_trips_typeof() {
        for s in [Specifier::TypeofType, Specifier::TypeofExpr] {
            assert_eq!(s.decay().undecay(), s);
        }
    }

    #[test]
    fn real_complex_round_trip() {
        for s in [
            Specifier::Int,
            Specifier::UChar,
            Specifier::LongLong,
            Specifier::Float,
            Specifier::Double,
            Specifier::Float128,
        ] {
            let complex = s.make_complex().unwrap();
            assert_eq!(complex.make_real().unwrap(), s);
        }
    }

    #[test]
    fn bit_int_real_complex_special_case() {
        assert_eq!(Specifier::BitInt.make_complex(), Some(Specifier::ComplexBitInt));
        assert_eq!(Specifier::ComplexBitInt.make_real(), Some(Specifier::BitInt));
    }
}
