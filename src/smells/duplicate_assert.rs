//! Textually identical assertions repeated in one test method.

use crate::smells::{assertions, classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Duplicate Assert";

pub struct DuplicateAssert {
    threshold: u32,
    result: SmellResult,
}

impl DuplicateAssert {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

impl SmellAnalyzer for DuplicateAssert {
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
            let mut seen: Vec<(String, Vec<Expr>)> = Vec::new();
            let mut duplicates = 0u32;
            visit::walk_exprs_in_stmts(method.body_stmts(), &mut |expr| {
                if let Expr::MethodCall { name, args, .. } = expr {
                    if assertions::is_assertion(name) {
                        if seen.iter().any(|(n, a)| n == name && a == args) {
                            duplicates += 1;
                        } else {
                            seen.push((name.clone(), args.clone()));
                        }
                    }
                }
            });
            let smelly = duplicates > self.threshold;
            self.result.record(
                SmellyElement::method(&method.name, smelly)
                    .with_data("duplicateCount", duplicates),
            );
            if smelly {
                self.result.add_score(duplicates);
            }
        }
        Ok(())
    }

    fn result(&self) -> &SmellResult {
        &self.result
    }
}
