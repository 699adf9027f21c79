//! Assertions without an explanatory message.
//!
//! A test with several unexplained assertions leaves the reader
//! guessing which one failed. A method with exactly one assertion is
//! never flagged; a single assertion needs no disambiguating message.

use crate::smells::{assertions, classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Assertion Roulette";

pub struct AssertionRoulette {
    threshold: u32,
    result: SmellResult,
}

impl AssertionRoulette {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

impl SmellAnalyzer for AssertionRoulette {
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
            let mut total = 0u32;
            let mut unexplained = 0u32;
            visit::walk_exprs_in_stmts(method.body_stmts(), &mut |expr| {
                if let Expr::MethodCall { name, args, .. } = expr {
                    if let Some(family) = assertions::classify(name) {
                        total += 1;
                        if !assertions::has_message(family, args) {
                            unexplained += 1;
                        }
                    }
                }
            });
            let smelly = unexplained >= self.threshold && total > 1;
            self.result.record(
                SmellyElement::method(&method.name, smelly)
                    .with_data("assertionCount", total)
                    .with_data("unexplainedCount", unexplained),
            );
            if smelly {
                self.result.add_score(unexplained);
            }
        }
        Ok(())
    }

    fn result(&self) -> &SmellResult {
        &self.result
    }
}
