//! External resources used inside test bodies.
//!
//! Files and database handles make a test depend on an environment it
//! does not control.

use crate::smells::{classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr, Stmt};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "Mystery Guest";

const FILE_TYPES: &[&str] = &[
    "File",
    "FileInputStream",
    "FileOutputStream",
    "FileReader",
    "FileWriter",
    "RandomAccessFile",
];

const DATABASE_TYPES: &[&str] = &[
    "Connection",
    "DriverManager",
    "Statement",
    "PreparedStatement",
    "CallableStatement",
    "ResultSet",
];

fn is_resource_type(type_name: &str) -> bool {
    let base = type_name.split('<').next().unwrap_or(type_name);
    FILE_TYPES.contains(&base) || DATABASE_TYPES.contains(&base)
}

pub struct MysteryGuest {
    threshold: u32,
    result: SmellResult,
}

impl MysteryGuest {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            result: SmellResult::new(NAME),
        }
    }
}

impl SmellAnalyzer for MysteryGuest {
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
            // declarations count once; an initializer constructing the
            // resource is the same guest, not a second one
            visit::walk_stmts(method.body_stmts(), &mut |stmt| {
                if let Stmt::LocalVar(decls) = stmt {
                    for d in decls {
                        let init_constructs = matches!(
                            d.init.as_ref().map(Expr::unwrapped),
                            Some(Expr::New { type_name, .. }) if is_resource_type(type_name)
                        );
                        if is_resource_type(&d.type_name) && !init_constructs {
                            count += 1;
                        }
                    }
                }
            });
            visit::walk_exprs_in_stmts(method.body_stmts(), &mut |expr| {
                if let Expr::New { type_name, .. } = expr {
                    if is_resource_type(type_name) {
                        count += 1;
                    }
                }
            });
            let smelly = count > self.threshold;
            self.result.record(
                SmellyElement::method(&method.name, smelly).with_data("resourceCount", count),
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
