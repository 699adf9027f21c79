//! Assertions comparing textual renderings.
//!
//! Comparing `toString` output couples the test to a representation
//! that changes for unrelated reasons. The analyzer tracks variables
//! and fields whose value came from a `toString` call and flags
//! assertions that reference them, or that call the conversion
//! directly in an argument.

use std::collections::BTreeSet;

use crate::smells::{assertions, classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr, Stmt};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Sensitive Equality";
const CONVERSION: &str = "toString";

pub struct SensitiveEquality {
    threshold: u32,
    result: SmellResult,
}

impl SensitiveEquality {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

fn contains_conversion(expr: &Expr) -> bool {
    let mut found = false;
    visit::walk_expr(expr, &mut |e| {
        if let Expr::MethodCall { name, .. } = e {
            if name == CONVERSION {
                found = true;
            }
        }
    });
    found
}

fn references_tainted(expr: &Expr, tainted: &BTreeSet<String>) -> bool {
    let mut found = false;
    visit::walk_expr(expr, &mut |e| {
        if let Some(name) = e.as_simple_name() {
            if tainted.contains(name) {
                found = true;
            }
        }
    });
    found
}

/// Field names whose initializer renders a value textually.
fn tainted_fields(unit: &CompilationUnit) -> BTreeSet<String> {
    let mut tainted = BTreeSet::new();
    for ty in &unit.types {
        for field in &ty.fields {
            for d in &field.declarators {
                if d.init.as_ref().is_some_and(contains_conversion) {
                    tainted.insert(d.name.clone());
                }
            }
        }
    }
    tainted
}

impl SmellAnalyzer for SensitiveEquality {
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
        let fields = tainted_fields(test_unit);
        for method in classify::test_methods(test_unit) {
            let mut tainted = fields.clone();
            let mut count = 0u32;
            visit::walk_stmts(method.body_stmts(), &mut |stmt| {
                track_stmt(stmt, &mut tainted);
                for expr in visit::top_exprs(stmt) {
                    visit::walk_expr(expr, &mut |e| {
                        if let Expr::MethodCall { name, args, .. } = e {
                            if assertions::is_assertion(name)
                                && args.iter().any(|a| {
                                    contains_conversion(a) || references_tainted(a, &tainted)
                                })
                            {
                                count += 1;
                            }
                        }
                    });
                }
            });
            let smelly = count > self.threshold;
            self.result.record(
                SmellyElement::method(&method.name, smelly).with_data("sensitiveCount", count),
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

/// Update the tainted set from a declarator or assignment whose
/// right-hand side renders a value textually.
fn track_stmt(stmt: &Stmt, tainted: &mut BTreeSet<String>) {
    match stmt {
        Stmt::LocalVar(decls) => {
            for d in decls {
                if d.init.as_ref().is_some_and(contains_conversion) {
                    tainted.insert(d.name.clone());
                }
            }
        }
        Stmt::Expr(Expr::Assign { target, value }) => {
            if let Some(name) = target.as_simple_name() {
                if contains_conversion(value) {
                    tainted.insert(name.to_string());
                } else {
                    tainted.remove(name);
                }
            }
        }
        _ => {}
    }
}
