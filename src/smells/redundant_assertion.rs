//! Assertions that can never fail.
//!
//! Either the expected and actual expressions are structurally
//! identical, or a predicate assertion is applied to a boolean or null
//! literal.

use crate::smells::assertions::{self, AssertionFamily};
use crate::smells::{classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr, Literal};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Redundant Assertion";

pub struct RedundantAssertion {
    result: SmellResult,
}

impl RedundantAssertion {
    pub fn new() -> Self {
        Self {
            result: SmellResult::new(NAME),
        }
    }
}

impl Default for RedundantAssertion {
    fn default() -> Self {
        Self::new()
    }
}

fn is_redundant(name: &str, args: &[Expr]) -> bool {
    let Some(family) = assertions::classify(name) else {
        return false;
    };
    match family {
        AssertionFamily::Equality | AssertionFamily::Identity => {
            assertions::value_pair(family, args).is_some_and(|(expected, actual)| {
                expected.unwrapped() == actual.unwrapped()
            })
        }
        AssertionFamily::Predicate => {
            assertions::observed_argument(family, args).is_some_and(|observed| {
                matches!(
                    observed.unwrapped(),
                    Expr::Literal(Literal::Bool(_)) | Expr::Literal(Literal::Null)
                )
            })
        }
        _ => false,
    }
}

impl SmellAnalyzer for RedundantAssertion {
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
            visit::walk_exprs_in_stmts(method.body_stmts(), &mut |expr| {
                if let Expr::MethodCall { name, args, .. } = expr {
                    if is_redundant(name, args) {
                        count += 1;
                    }
                }
            });
            let smelly = count > 0;
            self.result.record(
                SmellyElement::method(&method.name, smelly).with_data("redundantCount", count),
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
