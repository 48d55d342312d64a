//! `_BitInt(N)` payload (spec.md §2.2, §4.7). Small enough to store inline
//! rather than behind an `Rc`, unlike the teacher crate's `til/bitfield.rs`
//! (an in-struct C bitfield member, a different concept entirely — this is
//! C23's bit-precise integer *type*, not a record field's bit-width).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitIntData {
    /// Declared width in bits, `1..=N` where `N` is `_BitInt`'s implementation
    /// limit (spec.md §4.7 `BITINT_MAXWIDTH`, target-independent).
    pub bits: u8,
    pub signed: bool,
}
