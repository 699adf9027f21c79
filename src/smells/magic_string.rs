//! Unexplained string literals inside assertion calls.
//!
//! The string counterpart of the magic-number analyzer, with one
//! wrinkle: a leading string argument that the call's arity marks as an
//! explanatory message is not a magic value and is excluded.

use crate::smells::assertions::{self, AssertionFamily};
use crate::smells::{classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Magic String Test";

pub struct MagicString {
    threshold: u32,
    result: SmellResult,
}

impl MagicString {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

fn count_strings(expr: &Expr) -> u32 {
    let mut count = 0;
    visit::walk_expr(expr, &mut |e| {
        if let Expr::Literal(lit) = e {
            if lit.is_string() {
                count += 1;
            }
        }
    });
    count
}

/// Whether the first argument of this call is an explanatory message
/// rather than a value.
fn first_arg_is_message(family: AssertionFamily, args: &[Expr]) -> bool {
    assertions::has_message(family, args)
        && !matches!(family, AssertionFamily::Fail)
        && args.first().is_some_and(assertions::is_string_like)
}

impl SmellAnalyzer for MagicString {
    fn name(&self) -> &'static str {
        NAME
    }

    fn analyze(
        &mut self,
        test_unit: &CompilationUnit,
        _production_unit: Option<&CompilationUnit>,
        _test_name: &str,
        _production_name: Option<&str>,
    ) -> Result<(), SmellError> {
        for method in classify::test_methods(test_unit) {
            let mut literals = 0u32;
            visit::walk_exprs_in_stmts(method.body_stmts(), &mut |expr| {
                if let Expr::MethodCall { name, args, .. } = expr {
                    if let Some(family) = assertions::classify(name) {
                        let skip_head = first_arg_is_message(family, args);
                        for (i, arg) in args.iter().enumerate() {
                            if i == 0 && skip_head {
                                continue;
                            }
                            literals += count_strings(arg);
                        }
                    }
                }
            });
            let smelly = literals >= self.threshold;
            self.result.record(
                SmellyElement::method(&method.name, smelly).with_data("literalCount", literals),
            );
            if smelly {
                self.result.add_score(literals);
            }
        }
        Ok(())
    }

    fn result(&self) -> &SmellResult {
        &self.result
    }
}
