//! Thread.sleep calls inside test bodies.

use crate::smells::{classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Sleepy Test";

fn is_sleep_call(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::MethodCall { scope, name, .. }
            if name == "sleep"
                && matches!(
                    scope.as_deref().map(Expr::unwrapped),
                    Some(Expr::Name(obj)) if obj == "Thread"
                )
    )
}

pub struct SleepyTest {
    threshold: u32,
    result: SmellResult,
}

impl SleepyTest {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

impl SmellAnalyzer for SleepyTest {
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
                if is_sleep_call(expr) {
                    count += 1;
                }
            });
            let smelly = count > self.threshold;
            self.result.record(
                SmellyElement::method(&method.name, smelly).with_data("sleepCount", count),
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
        let mut analyzer = SleepyTest::new(0);
        analyzer.analyze(&unit, None, "T", None).unwrap();
        analyzer.result().clone()
    }

    #[test]
    fn positive_thread_sleep() {
        let result = run(
            r#"
            public class T {
                public void testWait() {
                    obj.start();
                    Thread.sleep(1000);
                    assertTrue(obj.isDone());
                }
            }
            "#,
        );
        assert!(result.has_smell());
    }

    #[test]
    fn negative_unrelated_sleep() {
        let result = run(
            r#"
            public class T {
                public void testNap() {
                    bear.sleep(1000);
                    assertTrue(bear.isAsleep());
                }
            }
            "#,
        );
        assert!(!result.has_smell());
    }
}
