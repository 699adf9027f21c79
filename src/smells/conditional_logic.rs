//! Control flow inside test bodies.
//!
//! Branches and loops in a test mean different executions verify
//! different things. Counts if/switch/ternary and every loop form.

use crate::smells::{classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr, Stmt};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Conditional Test Logic";

pub struct ConditionalTestLogic {
    threshold: u32,
    result: SmellResult,
}

impl ConditionalTestLogic {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

impl SmellAnalyzer for ConditionalTestLogic {
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
            let mut count = 0u32;
            visit::walk_stmts(method.body_stmts(), &mut |stmt| {
                if matches!(
                    stmt,
                    Stmt::If { .. }
                        | Stmt::Switch { .. }
                        | Stmt::For { .. }
                        | Stmt::ForEach { .. }
                        | Stmt::While { .. }
                        | Stmt::DoWhile { .. }
                ) {
                    count += 1;
                }
            });
            visit::walk_exprs_in_stmts(method.body_stmts(), &mut |expr| {
                if matches!(expr, Expr::Conditional { .. }) {
                    count += 1;
                }
            });
            let smelly = count > self.threshold;
            self.result.record(
                SmellyElement::method(&method.name, smelly).with_data("conditionalCount", count),
            );
            if smelly {
                self.result.add_score(count);
            }
        }
        Ok(())
    }

    fn result(&self) -> &SmellResult {
        &self.result
    }
}
