#![forbid(unsafe_code)]

// --- engine modules (spec.md) -----------------------------------------
pub mod attributes;
pub mod builder;
pub mod canonicalize;
pub mod combinator;
pub mod diagnostics;
pub mod equality;
pub mod interner;
pub mod layout;
pub mod printer;
pub mod qualifiers;
pub mod queries;
pub mod record_layout;
pub mod specifier;
pub mod target;
pub mod types;

#[cfg(test)]
mod test;

pub use diagnostics::{DiagnosticExtra, DiagnosticKind, DiagnosticSink, RecordingSink};
pub use interner::{Symbol, StringInterner};
pub use qualifiers::{QualifierBuilder, Qualifiers};
pub use specifier::Specifier;
pub use target::{Arch, Abi, CStandard, Dialect, LangOpts, Os, Target};
pub use types::Type;

/// A lexer/parser token position, opaque to this crate. The engine never
/// interprets it — only threads it through to [`DiagnosticSink`] so a front
/// end can turn a diagnostic into a source-mapped error (spec.md §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceToken(pub u32);

/// A handle to an AST expression node, opaque to this crate. Carried by
/// `typeof(expr)` and variable-length-array payloads purely so a front end
/// can recover the expression it supplied; the engine never evaluates or
/// compares it (spec.md §4.2, §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AstNodeId(pub u32);
