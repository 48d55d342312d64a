//! Target descriptor: primitive sizes, alignments, and the dialect-specific
//! ABI quirks the layout engine has to thread through every size/align query.
//!
//! Modeled directly on the teacher crate's `til::section::TILSectionHeader`,
//! which plays the same role for IDA's type library: it carries `size_int`,
//! `size_bool`, `size_enum`, `size_long_double`, `def_align` and a default
//! calling convention so that primitive sizes never have to be hardcoded at
//! the call site. This module generalizes that idea from "one compiler's
//! guess" to "one of several named hardware/ABI presets".

use std::num::NonZeroU8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    I586,
    Aarch64,
    Armv7,
    Avr,
    S390x,
    Wasm32,
    Sparc,
    Riscv64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    Ios,
    Windows,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Abi {
    Gnu,
    Musl,
    Msvc,
    Eabi,
}

/// Describes one (architecture, OS, ABI) triple's primitive sizes and
/// layout quirks. All sizes are in bytes; alignments in bytes.
#[derive(Debug, Clone)]
pub struct Target {
    pub arch: Arch,
    pub os: Os,
    pub abi: Abi,

    pub size_bool: NonZeroU8,
    pub size_short: NonZeroU8,
    pub size_int: NonZeroU8,
    pub size_long: NonZeroU8,
    pub size_long_long: NonZeroU8,
    pub size_int128: NonZeroU8,
    pub size_fp16: NonZeroU8,
    pub size_float: NonZeroU8,
    pub size_double: NonZeroU8,
    pub size_long_double: NonZeroU8,
    pub size_float80: NonZeroU8,
    pub size_float128: NonZeroU8,
    pub pointer_width: NonZeroU8,

    /// Default alignment for overaligned declarations with no explicit
    /// `aligned` argument (`__attribute__((aligned))`).
    pub default_requested_align: NonZeroU8,

    /// Max alignment the target's integer units can express; clamps
    /// `_BitInt(N)` alignment (spec.md §4.4).
    pub max_int_align: NonZeroU8,
}

impl Target {
    /// The baseline used throughout spec.md's worked examples.
    pub fn x86_64_linux_gnu() -> Self {
        Target {
            arch: Arch::X86_64,
            os: Os::Linux,
            abi: Abi::Gnu,
            size_bool: nz(1),
            size_short: nz(2),
            size_int: nz(4),
            size_long: nz(8),
            size_long_long: nz(8),
            size_int128: nz(16),
            size_fp16: nz(2),
            size_float: nz(4),
            size_double: nz(8),
            size_long_double: nz(16),
            size_float80: nz(16),
            size_float128: nz(16),
            pointer_width: nz(8),
            default_requested_align: nz(16),
            max_int_align: nz(16),
        }
    }

    /// spec.md §8 scenario 6: 32-bit x86, `long long` is 8 bytes but only
    /// 4-byte aligned.
    pub fn i586_linux_gnu() -> Self {
        Target {
            arch: Arch::I586,
            os: Os::Linux,
            abi: Abi::Gnu,
            size_bool: nz(1),
            size_short: nz(2),
            size_int: nz(4),
            size_long: nz(4),
            size_long_long: nz(8),
            size_int128: nz(16),
            size_fp16: nz(2),
            size_float: nz(4),
            size_double: nz(8),
            size_long_double: nz(12),
            size_float80: nz(12),
            size_float128: nz(16),
            pointer_width: nz(4),
            default_requested_align: nz(8),
            max_int_align: nz(4),
        }
    }

    pub fn aarch64_linux_gnu() -> Self {
        Target {
            arch: Arch::Aarch64,
            os: Os::Linux,
            abi: Abi::Gnu,
            size_bool: nz(1),
            size_short: nz(2),
            size_int: nz(4),
            size_long: nz(8),
            size_long_long: nz(8),
            size_int128: nz(16),
            size_fp16: nz(2),
            size_float: nz(4),
            size_double: nz(8),
            size_long_double: nz(16),
            size_float80: nz(16),
            size_float128: nz(16),
            pointer_width: nz(8),
            default_requested_align: nz(16),
            max_int_align: nz(16),
        }
    }

    /// spec.md §8 scenario 6: signed `char`, bitfield-type-alignment ignored.
    pub fn armv7_ios() -> Self {
        Target {
            arch: Arch::Armv7,
            os: Os::Ios,
            abi: Abi::Eabi,
            size_bool: nz(1),
            size_short: nz(2),
            size_int: nz(4),
            size_long: nz(4),
            size_long_long: nz(8),
            size_int128: nz(16),
            size_fp16: nz(2),
            size_float: nz(4),
            size_double: nz(8),
            size_long_double: nz(8),
            size_float80: nz(16),
            size_float128: nz(16),
            pointer_width: nz(4),
            default_requested_align: nz(8),
            max_int_align: nz(8),
        }
    }

    pub fn avr() -> Self {
        Target {
            arch: Arch::Avr,
            os: Os::None,
            abi: Abi::Gnu,
            size_bool: nz(1),
            size_short: nz(2),
            size_int: nz(2),
            size_long: nz(4),
            size_long_long: nz(8),
            size_int128: nz(16),
            size_fp16: nz(2),
            size_float: nz(4),
            size_double: nz(4),
            size_long_double: nz(4),
            size_float80: nz(16),
            size_float128: nz(16),
            pointer_width: nz(2),
            default_requested_align: nz(1),
            max_int_align: nz(1),
        }
    }

    pub fn s390x_linux_gnu() -> Self {
        Target {
            arch: Arch::S390x,
            os: Os::Linux,
            abi: Abi::Gnu,
            size_bool: nz(1),
            size_short: nz(2),
            size_int: nz(4),
            size_long: nz(8),
            size_long_long: nz(8),
            size_int128: nz(16),
            size_fp16: nz(2),
            size_float: nz(4),
            size_double: nz(8),
            size_long_double: nz(8),
            size_float80: nz(16),
            size_float128: nz(16),
            pointer_width: nz(8),
            default_requested_align: nz(8),
            max_int_align: nz(8),
        }
    }

    pub fn wasm32() -> Self {
        Target {
            arch: Arch::Wasm32,
            os: Os::None,
            abi: Abi::Gnu,
            size_bool: nz(1),
            size_short: nz(2),
            size_int: nz(4),
            size_long: nz(4),
            size_long_long: nz(8),
            size_int128: nz(16),
            size_fp16: nz(2),
            size_float: nz(4),
            size_double: nz(8),
            size_long_double: nz(16),
            size_float80: nz(16),
            size_float128: nz(16),
            pointer_width: nz(4),
            default_requested_align: nz(16),
            max_int_align: nz(16),
        }
    }

    pub fn x86_64_windows_msvc() -> Self {
        Target {
            arch: Arch::X86_64,
            os: Os::Windows,
            abi: Abi::Msvc,
            size_bool: nz(1),
            size_short: nz(2),
            size_int: nz(4),
            size_long: nz(4),
            size_long_long: nz(8),
            size_int128: nz(16),
            size_fp16: nz(2),
            size_float: nz(4),
            size_double: nz(8),
            size_long_double: nz(8),
            size_float80: nz(16),
            size_float128: nz(16),
            pointer_width: nz(8),
            default_requested_align: nz(8),
            max_int_align: nz(8),
        }
    }

    pub fn is_msvc(&self) -> bool {
        self.abi == Abi::Msvc
    }

    /// `__int128` is rejected on 32-bit targets, except `wasm32` (spec.md §2.6).
    pub fn supports_int128(&self) -> bool {
        self.pointer_width.get() >= 8 || self.arch == Arch::Wasm32
    }

    /// `__int128` aligns to 8 on s390x-linux-gnu, else its natural size.
    pub fn int128_alignment(&self) -> u64 {
        if self.arch == Arch::S390x {
            8
        } else {
            self.size_int128.get().into()
        }
    }

    /// ia32 System V caps every scalar's alignment at 4 bytes even when its
    /// size is larger (`long long`, `double`, `long double` all size 8+ but
    /// align 4) — spec.md §8 scenario 6. No other target in this set has
    /// the quirk.
    pub fn scalar_alignment_cap(&self) -> Option<u64> {
        if self.arch == Arch::I586 {
            Some(4)
        } else {
            None
        }
    }

    /// AVR aligns pointers to 1 byte regardless of pointer width.
    pub fn pointer_alignment(&self) -> u64 {
        if self.arch == Arch::Avr {
            1
        } else {
            self.pointer_width.get().into()
        }
    }

    /// Function "size" is always 1 byte; alignment varies by target.
    pub fn function_alignment(&self) -> u64 {
        match self.arch {
            Arch::Armv7 | Arch::Aarch64 | Arch::Sparc => 4,
            Arch::Riscv64 => 2,
            _ => 1,
        }
    }

    /// AVR and ARMv7-iOS ignore the natural alignment of a non-zero-sized
    /// bitfield's declared type, packing purely by bit-width (spec.md §4.4).
    pub fn ignore_nonzero_bitfield_type_alignment(&self) -> bool {
        matches!(self.arch, Arch::Avr) || (self.arch == Arch::Armv7 && self.os == Os::Ios)
    }

    /// Some 8-bit embedded targets pack every enum to its smallest fitting
    /// type regardless of `-fshort-enums` (spec.md §4.7 `enumIsPacked`:
    /// "target packs all enums").
    pub fn packs_all_enums(&self) -> bool {
        matches!(self.arch, Arch::Avr)
    }

    /// `char` signedness. ARMv7/AArch64 default to unsigned `char`, except
    /// Apple platforms, which default to signed (spec.md §8 scenario 6).
    pub fn char_is_signed(&self) -> bool {
        match self.arch {
            Arch::Armv7 | Arch::Aarch64 if self.os != Os::Ios => false,
            _ => true,
        }
    }

    pub fn sizeof_short(&self) -> NonZeroU8 {
        self.size_short
    }
}

const fn nz(v: u8) -> NonZeroU8 {
    match NonZeroU8::new(v) {
        Some(v) => v,
        None => panic!("target size must be non-zero"),
    }
}

/// C standard dialect and language-dialect emulation flags. Paired with
/// [`Target`] as the engine's other configuration input (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CStandard {
    C89,
    C99,
    C11,
    C17,
    C23,
}

/// Which compiler's specifier-combination and layout quirks to emulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Gcc,
    Clang,
    Msvc,
}

#[derive(Debug, Clone, Copy)]
pub struct LangOpts {
    pub standard: CStandard,
    pub dialect: Dialect,
    /// `-fshort-enums`: pack enums to the smallest type that fits, rather
    /// than always using `int`/target default.
    pub short_enums: bool,
}

impl LangOpts {
    pub fn gnu_c17() -> Self {
        LangOpts {
            standard: CStandard::C17,
            dialect: Dialect::Gcc,
            short_enums: false,
        }
    }

    pub fn clang_c23() -> Self {
        LangOpts {
            standard: CStandard::C23,
            dialect: Dialect::Clang,
            short_enums: false,
        }
    }

    pub fn msvc() -> Self {
        LangOpts {
            standard: CStandard::C17,
            dialect: Dialect::Msvc,
            short_enums: false,
        }
    }
}
