//! `typeof(expr)` and variable-length-array payloads, both of which need to
//! carry an opaque expression handle alongside a type (spec.md §4.2, §4.7).
//! No teacher file models this directly — IDA's type library never embeds
//! expressions — so this is grounded on spec.md's own "expr" payload
//! description, generalized to double as the VLA length-expression carrier
//! (`ast_node` = the length expression, `ty` = the array's element type)
//! rather than adding a fourth payload shape.

use super::Type;
use crate::AstNodeId;

#[derive(Debug, Clone)]
pub struct ExprData {
    pub ast_node: AstNodeId,
    pub ty: Type,
}

impl Type {
    /// `typeof(expr)`'s resolved type, or a VLA's element type.
    pub fn expr_payload(&self) -> Option<&ExprData> {
        self.payload_expr().map(|e| e.as_ref())
    }

    pub fn variable_len_array(ast_node: AstNodeId, elem: Type) -> Self {
        use crate::qualifiers::Qualifiers;
        use crate::specifier::Specifier;
        Type {
            specifier: Specifier::VariableLenArray,
            qualifiers: Qualifiers::NONE,
            payload: super::Payload::Expr(std::rc::Rc::new(ExprData { ast_node, ty: elem })),
        }
    }

    pub fn unspecified_variable_len_array(elem: Type) -> Self {
        use crate::qualifiers::Qualifiers;
        use crate::specifier::Specifier;
        Type {
            specifier: Specifier::UnspecifiedVariableLenArray,
            qualifiers: Qualifiers::NONE,
            payload: super::Payload::SubType(std::rc::Rc::new(elem)),
        }
    }
}
