//! Diagnostic print calls left in test bodies.

use crate::smells::{classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Print Statement";
const PRINT_METHODS: &[&str] = &["print", "println", "printf", "write"];

fn is_print_call(expr: &Expr) -> bool {
    let Expr::MethodCall { scope, name, .. } = expr else {
        return false;
    };
    if name == "printStackTrace" {
        return true;
    }
    if !PRINT_METHODS.contains(&name.as_str()) {
        return false;
    }
    matches!(
        scope.as_deref().map(Expr::unwrapped),
        Some(Expr::FieldAccess { scope, name })
            if matches!(scope.unwrapped(), Expr::Name(obj) if obj == "System")
                && (name == "out" || name == "err")
    )
}

pub struct PrintStatement {
    threshold: u32,
    result: SmellResult,
}

impl PrintStatement {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

impl SmellAnalyzer for PrintStatement {
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
                if is_print_call(expr) {
                    count += 1;
                }
            });
            let smelly = count > self.threshold;
            self.result.record(
                SmellyElement::method(&method.name, smelly).with_data("printCount", count),
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
