//! Tests whose assertions observe more than one distinct invocation of
//! the class under test.
//!
//! Built on the call/alias model: every assertion is bound to the call
//! judged responsible for the state it observes, with non-mutating
//! accessors passing attribution through to the nearest preceding
//! producer. More than one distinct bound call means the test verifies
//! more than one logical behavior.

use crate::resolve::ProductionIndex;
use crate::smells::callmodel::CallModel;
use crate::smells::{classify, SmellAnalyzer, SmellError};
use crate::syntax::CompilationUnit;
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Eager Test";

pub struct EagerTest {
    result: SmellResult,
}

impl EagerTest {
    pub fn new() -> Self {
        Self {
            result: SmellResult::new(NAME),
        }
    }
}

impl Default for EagerTest {
    fn default() -> Self {
        Self::new()
    }
}

impl SmellAnalyzer for EagerTest {
    fn name(&self) -> &'static str {
        NAME
    }

    fn analyze(
        &mut self,
        test_unit: &CompilationUnit,
        production_unit: Option<&CompilationUnit>,
        _test_name: &str,
        production_name: Option<&str>,
    ) -> Result<(), SmellError> {
        let production_unit = production_unit
            .ok_or(SmellError::MissingProductionFile { smell: NAME })?;
        let index = ProductionIndex::build(production_unit);
        let cut_class = if index.class_name().is_empty() {
            production_name.unwrap_or_default().to_string()
        } else {
            index.class_name().to_string()
        };
        for method in classify::test_methods(test_unit) {
            let model = CallModel::build(test_unit, method, &cut_class, Some(&index));
            let distinct = model.distinct_bound_calls();
            let smelly = distinct > 1;
            self.result.record(
                SmellyElement::method(&method.name, smelly).with_data("boundCalls", distinct),
            );
            if smelly {
                self.result.add_score(1);
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

    const PRODUCTION: &str = r#"
        public class Foo {
            public void setValue(int v) {}
            public int getValue() { return 0; }
        }
    "#;

    fn run(test_source: &str) -> SmellResult {
        let mut parser = JavaParser::new().unwrap();
        let test_unit = parser.parse_unit(test_source).unwrap();
        let production_unit = parser.parse_unit(PRODUCTION).unwrap();
        let mut analyzer = EagerTest::new();
        analyzer
            .analyze(&test_unit, Some(&production_unit), "FooTest", Some("Foo"))
            .unwrap();
        analyzer.result().clone()
    }

    #[test]
    fn negative_single_behavior() {
        let result = run(
            r#"
            public class FooTest {
                public void testOne() {
                    Foo f = new Foo();
                    f.setValue(5);
                    assertEquals(5, f.getValue());
                }
            }
            "#,
        );
        assert!(!result.has_smell());
    }

    #[test]
    fn positive_two_behaviors_in_one_method() {
        let result = run(
            r#"
            public class FooTest {
                public void testTwo() {
                    Foo f = new Foo();
                    f.setValue(5);
                    assertEquals(5, f.getValue());
                    Foo f2 = new Foo();
                    f2.setValue(9);
                    assertEquals(9, f2.getValue());
                }
            }
            "#,
        );
        assert!(result.has_smell());
        assert!(result.smelly_names.contains("testTwo"));
    }

    #[test]
    fn missing_production_file_is_reported() {
        let unit = JavaParser::new()
            .unwrap()
            .parse_unit("public class FooTest { public void testA() {} }")
            .unwrap();
        let mut analyzer = EagerTest::new();
        let err = analyzer.analyze(&unit, None, "FooTest", None).unwrap_err();
        assert!(matches!(err, SmellError::MissingProductionFile { .. }));
    }
}
