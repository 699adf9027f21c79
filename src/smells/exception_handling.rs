//! Throw statements and catch clauses inside test bodies.
//!
//! Tests should let the framework handle failures; hand-rolled
//! exception plumbing hides them.

use crate::smells::{classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Stmt};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Exception Catching Throwing";

pub struct ExceptionHandling {
    threshold: u32,
    result: SmellResult,
}

impl ExceptionHandling {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

impl SmellAnalyzer for ExceptionHandling {
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
            visit::walk_stmts(method.body_stmts(), &mut |stmt| match stmt {
                Stmt::Throw(_) => count += 1,
                Stmt::Try { catches, .. } => count += catches.len() as u32,
                _ => {}
            });
            let smelly = count > self.threshold;
            self.result.record(
                SmellyElement::method(&method.name, smelly).with_data("handlerCount", count),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JavaParser;

    fn run(source: &str) -> SmellResult {
        let unit = JavaParser::new().unwrap().parse_unit(source).unwrap();
        let mut analyzer = ExceptionHandling::new(0);
        analyzer.analyze(&unit, None, "T", None).unwrap();
        analyzer.result().clone()
    }

    #[test]
    fn positive_catch_and_throw() {
        let result = run(
            r#"
            public class T {
                public void testCatch() {
                    try {
                        obj.run();
                    } catch (IOException e) {
                        throw new RuntimeException(e);
                    }
                }
            }
            "#,
        );
        assert!(result.has_smell());
        assert_eq!(result.score, 2);
    }

    #[test]
    fn negative_no_handling() {
        let result = run(
            r#"
            public class T {
                public void testPlain() { assertTrue(obj.run()); }
            }
            "#,
        );
        assert!(!result.has_smell());
    }
}
