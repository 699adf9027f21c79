//! Test methods spanning too many source lines.

use crate::smells::{classify, SmellAnalyzer, SmellError};
use crate::syntax::CompilationUnit;
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Verbose Test";

pub struct VerboseTest {
    threshold: u32,
    result: SmellResult,
}

impl VerboseTest {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

impl SmellAnalyzer for VerboseTest {
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
            let span = method.line_span() as u32;
            let smelly = span > self.threshold;
            self.result
                .record(SmellyElement::method(&method.name, smelly).with_data("lineSpan", span));
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

    fn run(source: &str, threshold: u32) -> SmellResult {
        let unit = JavaParser::new().unwrap().parse_unit(source).unwrap();
        let mut analyzer = VerboseTest::new(threshold);
        analyzer.analyze(&unit, None, "T", None).unwrap();
        analyzer.result().clone()
    }

    #[test]
    fn positive_long_method() {
        let body = "assertTrue(ok);\n".repeat(10);
        let source = format!("public class T {{ public void testLong() {{\n{body}}} }}");
        let result = run(&source, 5);
        assert!(result.has_smell());
    }

    #[test]
    fn negative_short_method() {
        let result = run(
            "public class T { public void testShort() { assertTrue(ok); } }",
            5,
        );
        assert!(!result.has_smell());
    }
}
