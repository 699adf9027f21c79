//! Tests that use only part of the shared fixture.
//!
//! The setup method's field assignments define the fixture. A field the
//! setup passes into a collaborator's constructor or method call, or
//! drives directly as a call receiver, is being wired, not exposed for
//! reuse, and drops out of that set. A test method should then
//! reference exactly the remaining fixture fields; referencing a strict
//! subset means the fixture is too general for it.

use std::collections::BTreeSet;

use crate::smells::{classify, SmellAnalyzer, SmellError};
use crate::syntax::{visit, CompilationUnit, Expr, MethodDecl};
use crate::{SmellResult, SmellyElement};

const NAME: &str = "General Fixture";

pub struct GeneralFixture {
    result: SmellResult,
}

impl GeneralFixture {
    pub fn new() -> Self {
        Self {
            result: SmellResult::new(NAME),
        }
    }
}

impl Default for GeneralFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Fields the setup method assigns, minus those it wires into
/// collaborators as call or constructor arguments or uses as a call
/// receiver. The receiver is traced back through field-access and cast
/// wrappers to the underlying field name.
fn setup_fields(setup: &MethodDecl) -> BTreeSet<String> {
    let mut fields = BTreeSet::new();
    visit::walk_exprs_in_stmts(setup.body_stmts(), &mut |expr| {
        if let Expr::Assign { target, .. } = expr {
            if let Some(name) = target.as_simple_name() {
                fields.insert(name.to_string());
            }
        }
    });
    let mut consumed = BTreeSet::new();
    visit::walk_exprs_in_stmts(setup.body_stmts(), &mut |expr| {
        let args = match expr {
            Expr::MethodCall { scope, args, .. } => {
                if let Some(recv) = scope.as_deref().and_then(visit::receiver_name) {
                    if fields.contains(recv) {
                        consumed.insert(recv.to_string());
                    }
                }
                args
            }
            Expr::New { args, .. } => args,
            _ => return,
        };
        for arg in args {
            if let Some(name) = arg.as_simple_name() {
                if fields.contains(name) {
                    consumed.insert(name.to_string());
                }
            }
        }
    });
    fields.difference(&consumed).cloned().collect()
}

/// Fixture fields the method references by name, directly or through
/// `this.`.
fn referenced_fields(method: &MethodDecl, fields: &BTreeSet<String>) -> BTreeSet<String> {
    let mut used = BTreeSet::new();
    visit::walk_exprs_in_stmts(method.body_stmts(), &mut |expr| {
        let name = match expr {
            Expr::Name(n) => Some(n.as_str()),
            Expr::FieldAccess { scope, name } if matches!(scope.unwrapped(), Expr::This) => {
                Some(name.as_str())
            }
            _ => None,
        };
        if let Some(n) = name {
            if fields.contains(n) {
                used.insert(n.to_string());
            }
        }
    });
    used
}

impl SmellAnalyzer for GeneralFixture {
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
        let fields = match classify::setup_method(test_unit) {
            Some(setup) => setup_fields(setup),
            None => BTreeSet::new(),
        };
        for method in classify::test_methods(test_unit) {
            let used = referenced_fields(method, &fields);
            let smelly = !fields.is_empty() && used.len() != fields.len();
            self.result.record(
                SmellyElement::method(&method.name, smelly)
                    .with_data("fixtureCount", used.len())
                    .with_data("setupFieldCount", fields.len()),
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

    fn run(source: &str) -> SmellResult {
        let unit = JavaParser::new().unwrap().parse_unit(source).unwrap();
        let mut analyzer = GeneralFixture::new();
        analyzer.analyze(&unit, None, "T", None).unwrap();
        analyzer.result().clone()
    }

    const FIXTURE: &str = r#"
        public class T {
            Foo x;
            Bar y;
            public void setUp() {
                x = new Foo();
                y = new Bar();
            }
            public void testSubset() {
                assertEquals(1, x.size());
            }
            public void testFull() {
                assertEquals(1, x.size());
                assertEquals(2, y.size());
            }
        }
    "#;

    #[test]
    fn subset_flagged_full_usage_not() {
        let result = run(FIXTURE);
        assert!(result.smelly_names.contains("testSubset"));
        assert!(!result.smelly_names.contains("testFull"));
        assert_eq!(result.score, 1);
    }

    #[test]
    fn analysis_is_idempotent() {
        assert_eq!(run(FIXTURE), run(FIXTURE));
    }

    #[test]
    fn wired_field_drops_out_of_fixture() {
        let result = run(
            r#"
            public class T {
                Foo x;
                Helper h;
                public void setUp() {
                    x = new Foo();
                    h = new Helper(x);
                }
                public void testOnlyHelper() {
                    assertNotNull(h);
                }
            }
            "#,
        );
        // x is consumed by the Helper constructor; the fixture is {h}
        // and the test uses all of it
        assert!(!result.has_smell());
    }

    #[test]
    fn receiver_field_drops_out_of_fixture() {
        let result = run(
            r#"
            public class T {
                Bank bank;
                public void setUp() {
                    bank = new Bank();
                    bank.register();
                }
                public void testUnrelated() {
                    assertTrue(ready);
                }
            }
            "#,
        );
        // the setup drives bank itself; the fixture set is empty and
        // a test referencing none of it is clean
        assert!(!result.has_smell());
    }

    #[test]
    fn this_qualified_receiver_also_drops_out() {
        let result = run(
            r#"
            public class T {
                Bank bank;
                Ledger ledger;
                public void setUp() {
                    bank = new Bank();
                    ledger = new Ledger();
                    this.bank.register(ledger);
                }
                public void testNothing() {
                    assertTrue(ready);
                }
            }
            "#,
        );
        assert!(!result.has_smell());
    }

    #[test]
    fn no_setup_method_means_no_smell() {
        let result = run(
            r#"
            public class T {
                public void testPlain() { assertTrue(ready); }
            }
            "#,
        );
        assert!(!result.has_smell());
    }
}
