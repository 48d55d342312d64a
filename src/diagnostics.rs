//! Diagnostic kinds raised by the type engine and the sink that receives them.
//!
//! The engine never renders text: it selects a [`DiagnosticKind`] and hands it,
//! together with whatever context is relevant, to a [`DiagnosticSink`] supplied
//! by the caller. Rendering, source-location lookup and suppression policy all
//! live on the other side of that trait.

use crate::SourceToken;

/// Closed set of diagnostics the engine can raise. See spec.md §7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    RestrictNonPointer,
    AtomicArray,
    AtomicFunc,
    AtomicIncomplete,
    QualOnRetType,
    QualifierNonOutermostArray,

    ArrayIncompleteElem,
    ArrayFuncElem,
    StaticNonOutermostArray,
    FuncCannotReturnArray,
    FuncCannotReturnFunc,

    CannotCombineSpec,
    SpecFromTypedef,
    DuplicateDeclSpec,
    InvalidTypeof,
    MissingTypeSpecifier,
    PlainComplex,
    ComplexInt,

    SignedBitIntTooSmall,
    UnsignedBitIntTooSmall,
    BitIntTooBig,

    TypeNotSupportedOnTarget,
}

/// Extra payload a diagnostic may carry, beyond its kind and token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticExtra {
    None,
    Width(u32),
    ByteCount(u64),
}

/// Receives diagnostics raised while building or querying types.
///
/// Implementations decide how (or whether) to render and store these; the
/// engine only ever calls one of the four methods below, never inspects the
/// return value, and never blocks on it (see spec.md §5: pure, synchronous,
/// no I/O).
pub trait DiagnosticSink {
    fn err(&mut self, kind: DiagnosticKind);
    fn err_tok(&mut self, kind: DiagnosticKind, tok: SourceToken);
    fn err_str(&mut self, kind: DiagnosticKind, tok: SourceToken, text: &str);
    fn err_extra(&mut self, kind: DiagnosticKind, tok: SourceToken, extra: DiagnosticExtra);
}

/// A sink that records every diagnostic it receives, in order.
///
/// Handy for tests and for callers that want to defer rendering; mirrors the
/// shape of a parser's error list without imposing a rendering policy.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub records: Vec<(DiagnosticKind, Option<SourceToken>, DiagnosticExtra)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = DiagnosticKind> + '_ {
        self.records.iter().map(|(k, _, _)| *k)
    }
}

impl DiagnosticSink for RecordingSink {
    fn err(&mut self, kind: DiagnosticKind) {
        self.records.push((kind, None, DiagnosticExtra::None));
    }

    fn err_tok(&mut self, kind: DiagnosticKind, tok: SourceToken) {
        self.records.push((kind, Some(tok), DiagnosticExtra::None));
    }

    fn err_str(&mut self, kind: DiagnosticKind, tok: SourceToken, text: &str) {
        self.records.push((
            kind,
            Some(tok),
            DiagnosticExtra::Width(text.len() as u32),
        ));
    }

    fn err_extra(&mut self, kind: DiagnosticKind, tok: SourceToken, extra: DiagnosticExtra) {
        self.records.push((kind, Some(tok), extra));
    }
}
