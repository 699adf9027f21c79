//! IDE-generated placeholder test classes.

use crate::smells::{SmellAnalyzer, SmellError};
use crate::syntax::CompilationUnit;
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Default Test";
const DEFAULT_CLASSES: &[&str] = &["ExampleUnitTest", "ExampleInstrumentedTest"];

pub struct DefaultTest {
    result: SmellResult,
}

impl DefaultTest {
    pub fn new() -> Self {
        Self {
            result: SmellResult::new(NAME),
        }
    }
}

impl Default for DefaultTest {
    fn default() -> Self {
        Self::new()
    }
}

impl SmellAnalyzer for DefaultTest {
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
        for ty in &test_unit.types {
            let smelly = DEFAULT_CLASSES.contains(&ty.name.as_str());
            self.result.record(SmellyElement::class(&ty.name, smelly));
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

    fn run(source: &str) -> SmellResult {
        let unit = JavaParser::new().unwrap().parse_unit(source).unwrap();
        let mut analyzer = DefaultTest::new();
        analyzer.analyze(&unit, None, "T", None).unwrap();
        analyzer.result().clone()
    }

    #[test]
    fn positive_generated_class_name() {
        let result = run(
            "public class ExampleUnitTest { @Test public void addition_isCorrect() {} }",
        );
        assert!(result.smelly_names.contains("ExampleUnitTest"));
    }

    #[test]
    fn negative_real_class_name() {
        let result = run("public class AccountTest { @Test public void testAdd() {} }");
        assert!(!result.has_smell());
    }
}
