//! Files used without checking that they exist.
//!
//! A `File` handle constructed in a test is optimistic until one of
//! the existence probes runs against it.

use std::collections::BTreeSet;

use crate::smells::{classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr, Stmt};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Resource Optimism";
const EXISTENCE_CHECKS: &[&str] = &["exists", "isFile", "isDirectory", "notExists"];

pub struct ResourceOptimism {
    threshold: u32,
    result: SmellResult,
}

impl ResourceOptimism {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

fn is_file_type(type_name: &str) -> bool {
    type_name == "File"
}

impl SmellAnalyzer for ResourceOptimism {
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
            let mut files = BTreeSet::new();
            visit::walk_stmts(method.body_stmts(), &mut |stmt| {
                if let Stmt::LocalVar(decls) = stmt {
                    for d in decls {
                        if is_file_type(&d.type_name) {
                            files.insert(d.name.clone());
                        }
                    }
                }
            });
            let mut checked = BTreeSet::new();
            visit::walk_exprs_in_stmts(method.body_stmts(), &mut |expr| {
                if let Expr::MethodCall {
                    scope: Some(scope),
                    name,
                    ..
                } = expr
                {
                    if EXISTENCE_CHECKS.contains(&name.as_str()) {
                        if let Some(receiver) = scope.as_simple_name() {
                            checked.insert(receiver.to_string());
                        }
                    }
                }
            });
            let unchecked = files.difference(&checked).count() as u32;
            let smelly = unchecked > self.threshold;
            self.result.record(
                SmellyElement::method(&method.name, smelly).with_data("uncheckedFiles", unchecked),
            );
            if smelly {
                self.result.add_score(unchecked);
            }
        }
        Ok(())
    }

    fn result(&self) -> &SmellResult {
        &self.result
    }
}
