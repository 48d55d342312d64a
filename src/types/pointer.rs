//! Pointer construction helpers (spec.md §2.3). The payload itself is just
//! the shared `sub_type` slot on [`super::Type`] — there is no dedicated
//! `PointerData`, the same way the teacher crate's `til/pointer.rs` wraps a
//! single nested `Type` with no extra fields of its own.

use super::Type;

impl Type {
    pub fn pointee(&self) -> Option<&Type> {
        if self.is_pointer() {
            self.payload_sub_type()
        } else {
            None
        }
    }
}
