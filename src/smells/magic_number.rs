//! Unexplained numeric literals inside assertion calls.

use crate::smells::{assertions, classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr, Literal};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Magic Number Test";

pub struct MagicNumber {
    threshold: u32,
    result: SmellResult,
}

impl MagicNumber {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

/// Count numeric literal leaves anywhere under `expr`.
fn count_numeric(expr: &Expr) -> u32 {
    let mut count = 0;
    visit::walk_expr(expr, &mut |e| {
        if let Expr::Literal(lit) = e {
            if lit.is_numeric() {
                count += 1;
            }
        }
    });
    count
}

impl SmellAnalyzer for MagicNumber {
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
                    if assertions::is_assertion(name) {
                        for arg in args {
                            literals += count_numeric(arg);
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
