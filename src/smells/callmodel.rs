//! Call and alias tracking for one test method.
//!
//! The model records every invocation on (or construction of) the class
//! under test, which variable holds which call's return value, which
//! call last mutated which receiver, and an alias chain for `a = b`
//! reassignment. Assertions are then bound to the call whose outcome
//! they observe; a non-mutating accessor is transparent and attribution
//! passes through to the nearest preceding producer on the same
//! receiver. The whole model is rebuilt from scratch for every test
//! method, seeded from field initializers, constructor bodies and the
//! setup method, so no state crosses method boundaries.

use std::collections::{HashMap, HashSet};

use crate::resolve::{ProductionIndex, Resolution};
use crate::smells::{assertions, classify};
use crate::syntax::{visit, CompilationUnit, Expr, MethodDecl, Stmt};

const MUTATOR_PREFIXES: &[&str] = &[
    "set", "add", "remove", "clear", "update", "put", "append", "push", "pop", "insert",
    "delete", "do", "next", "reset", "log",
];

const GETTER_PREFIXES: &[&str] = &["get", "is", "contains", "exists", "has", "to"];
const GETTER_EXACT: &[&str] = &["size", "capacity"];

/// One invocation on the class under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallInstance {
    pub id: usize,
    /// Receiver variable (alias root at registration time); for a
    /// constructor, the variable being initialized
    pub receiver: String,
    pub method: String,
    pub is_ctor: bool,
    pub is_mutator: bool,
    /// Registration order; unique within one model
    pub position: usize,
    pub arity: usize,
}

impl CallInstance {
    fn is_producer(&self) -> bool {
        self.is_ctor || self.is_mutator
    }
}

/// Why an assertion was bound to a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindRule {
    /// The observed expression is itself a call on the class under test
    DirectCall,
    /// The observed variable holds the call's return value
    ReturnVar,
    /// A transparent getter passed attribution to the nearest
    /// preceding producer on the same receiver
    NearestProducer,
    /// A getter with no preceding producer; bound loosely to itself
    GetterNoProducer,
    /// The observed expression's root variable holds a tracked value
    DerivedFrom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssertBinding {
    pub call_id: usize,
    pub rule: BindRule,
}

/// The per-method call/alias model.
pub struct CallModel<'a> {
    cut_class: String,
    production: Option<&'a ProductionIndex>,
    calls: Vec<CallInstance>,
    /// variable -> call whose return value it holds
    value_from_call: HashMap<String, usize>,
    /// receiver root -> last call that mutated it
    last_mutation: HashMap<String, usize>,
    /// variable -> its alias root
    alias_root: HashMap<String, String>,
    bindings: Vec<AssertBinding>,
    position: usize,
}

impl<'a> CallModel<'a> {
    /// Build the model for one test method. Field initializers,
    /// constructor bodies and the setup method are replayed first so
    /// inherited fixture state is known before the body runs.
    pub fn build(
        unit: &CompilationUnit,
        method: &MethodDecl,
        cut_class: &str,
        production: Option<&'a ProductionIndex>,
    ) -> Self {
        let mut model = CallModel {
            cut_class: cut_class.to_string(),
            production,
            calls: Vec::new(),
            value_from_call: HashMap::new(),
            last_mutation: HashMap::new(),
            alias_root: HashMap::new(),
            bindings: Vec::new(),
            position: 0,
        };
        if let Some(ty) = unit.primary_type() {
            for field in &ty.fields {
                for d in &field.declarators {
                    if model.is_cut_type(&field.type_name) {
                        model
                            .alias_root
                            .entry(d.name.clone())
                            .or_insert_with(|| d.name.clone());
                    }
                    if let Some(init) = &d.init {
                        model.handle_rhs(&d.name, init);
                    }
                }
            }
            for ctor in &ty.constructors {
                model.process_stmts(&ctor.body);
            }
        }
        if let Some(setup) = classify::setup_method(unit) {
            if setup.name != method.name {
                model.process_stmts(setup.body_stmts());
            }
        }
        model.process_stmts(method.body_stmts());
        model
    }

    pub fn bindings(&self) -> &[AssertBinding] {
        &self.bindings
    }

    pub fn calls(&self) -> &[CallInstance] {
        &self.calls
    }

    /// Number of distinct call identities any assertion is bound to.
    pub fn distinct_bound_calls(&self) -> usize {
        self.bindings
            .iter()
            .map(|b| b.call_id)
            .collect::<HashSet<_>>()
            .len()
    }

    fn is_cut_type(&self, type_name: &str) -> bool {
        !self.cut_class.is_empty()
            && (type_name == self.cut_class
                || type_name
                    .strip_prefix(self.cut_class.as_str())
                    .is_some_and(|rest| rest.starts_with('<')))
    }

    /// Alias chain lookup; idempotent, cycle-guarded.
    fn root_of(&self, name: &str) -> String {
        let mut current = name;
        let mut hops = 0;
        while let Some(next) = self.alias_root.get(current) {
            if next == current || hops > self.alias_root.len() {
                break;
            }
            current = next;
            hops += 1;
        }
        current.to_string()
    }

    fn tracked(&self, root: &str) -> bool {
        self.alias_root.contains_key(root)
            || self.value_from_call.contains_key(root)
            || self.last_mutation.contains_key(root)
    }

    fn is_mutator(&self, name: &str, arity: usize) -> bool {
        if MUTATOR_PREFIXES.iter().any(|p| name.starts_with(p)) {
            return true;
        }
        match self.production.map(|p| p.resolve(name, arity)) {
            Some(Resolution::Resolved(sig)) => sig.returns_void(),
            _ => false,
        }
    }

    fn looks_like_getter(&self, name: &str, arity: usize) -> bool {
        if GETTER_PREFIXES.iter().any(|p| name.starts_with(p)) || GETTER_EXACT.contains(&name) {
            return true;
        }
        match self.production.map(|p| p.resolve(name, arity)) {
            Some(Resolution::Resolved(sig)) => {
                !sig.returns_void() && !MUTATOR_PREFIXES.iter().any(|p| name.starts_with(p))
            }
            _ => false,
        }
    }

    fn bump_position(&mut self) -> usize {
        let pos = self.position;
        self.position += 1;
        pos
    }

    fn push_call(
        &mut self,
        receiver: String,
        method: String,
        is_ctor: bool,
        is_mutator: bool,
        arity: usize,
    ) -> usize {
        let id = self.calls.len();
        let position = self.bump_position();
        self.calls.push(CallInstance {
            id,
            receiver,
            method,
            is_ctor,
            is_mutator,
            position,
            arity,
        });
        id
    }

    fn process_stmts(&mut self, stmts: &[Stmt]) {
        visit::walk_stmts(stmts, &mut |stmt| self.process_stmt(stmt));
    }

    fn process_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::LocalVar(decls) => {
                for d in decls {
                    if self.is_cut_type(&d.type_name) {
                        self.alias_root
                            .entry(d.name.clone())
                            .or_insert_with(|| d.name.clone());
                    }
                    if let Some(init) = &d.init {
                        self.handle_rhs(&d.name, init);
                    }
                }
            }
            Stmt::Expr(e) => self.handle_expr_stmt(e),
            Stmt::Return(Some(e)) | Stmt::Throw(e) => {
                self.register_calls_in(e);
            }
            Stmt::If { cond, .. } | Stmt::While { cond, .. } | Stmt::DoWhile { cond, .. } => {
                self.register_calls_in(cond);
            }
            Stmt::For { header, .. } => {
                for e in header {
                    self.register_calls_in(e);
                }
            }
            Stmt::ForEach { iterable, .. } => {
                self.register_calls_in(iterable);
            }
            Stmt::Switch { selector, .. } => {
                self.register_calls_in(selector);
            }
            _ => {}
        }
    }

    fn handle_expr_stmt(&mut self, expr: &Expr) {
        match expr.unwrapped() {
            Expr::Assign { target, value } => match target.as_simple_name() {
                Some(lhs) => {
                    let lhs = lhs.to_string();
                    self.handle_rhs(&lhs, value);
                }
                None => {
                    self.register_calls_in(value);
                }
            },
            Expr::MethodCall { name, args, .. } if assertions::is_assertion(name) => {
                self.handle_assertion(name, args);
            }
            other => {
                self.register_calls_in(other);
            }
        }
    }

    /// Process the right-hand side of a declarator or assignment.
    fn handle_rhs(&mut self, lhs: &str, rhs: &Expr) {
        let rhs = rhs.unwrapped();
        if let Some(src) = rhs.as_simple_name() {
            let root = self.root_of(src);
            self.alias_root.insert(lhs.to_string(), root);
            return;
        }
        match rhs {
            Expr::New { type_name, args } if self.is_cut_type(type_name) => {
                for a in args {
                    self.register_calls_in(a);
                }
                let id =
                    self.push_call(lhs.to_string(), type_name.clone(), true, false, args.len());
                self.alias_root.insert(lhs.to_string(), lhs.to_string());
                self.value_from_call.insert(lhs.to_string(), id);
                self.last_mutation.insert(lhs.to_string(), id);
            }
            _ => {
                let (_, top) = self.register_calls_in(rhs);
                if let Some(id) = top {
                    self.alias_root
                        .entry(lhs.to_string())
                        .or_insert_with(|| lhs.to_string());
                    self.value_from_call.insert(lhs.to_string(), id);
                }
            }
        }
    }

    /// Register every call on the class under test reachable from
    /// `expr`. Returns the registered ids and, when the expression is
    /// itself such a call, its id.
    fn register_calls_in(&mut self, expr: &Expr) -> (Vec<usize>, Option<usize>) {
        let target = expr.unwrapped();
        let mut found: Vec<&Expr> = Vec::new();
        visit::walk_expr(target, &mut |e| {
            if matches!(e, Expr::MethodCall { .. } | Expr::New { .. }) {
                found.push(e);
            }
        });
        let mut ids = Vec::new();
        let mut top = None;
        for node in found {
            if let Some(id) = self.register_one(node) {
                ids.push(id);
                if std::ptr::eq(node, target) {
                    top = Some(id);
                }
            }
        }
        (ids, top)
    }

    /// Register a single call node if its receiver resolves to the
    /// class under test; otherwise ignore it.
    fn register_one(&mut self, expr: &Expr) -> Option<usize> {
        match expr {
            Expr::MethodCall { scope, name, args } => {
                let receiver = self.receiver_if_cut(scope.as_deref(), name, args.len())?;
                let mutates = self.is_mutator(name, args.len());
                let id =
                    self.push_call(receiver.clone(), name.clone(), false, mutates, args.len());
                if mutates {
                    self.last_mutation.insert(receiver, id);
                }
                Some(id)
            }
            Expr::New { type_name, args } if self.is_cut_type(type_name) => {
                let id = self.calls.len();
                let receiver = format!("<new{id}>");
                let id =
                    self.push_call(receiver.clone(), type_name.clone(), true, false, args.len());
                self.last_mutation.insert(receiver, id);
                Some(id)
            }
            _ => None,
        }
    }

    /// Resolve a call's receiver to a class-under-test alias root:
    /// directly via a tracked variable, by class name for static-style
    /// calls, or through a production name+arity match.
    fn receiver_if_cut(
        &mut self,
        scope: Option<&Expr>,
        name: &str,
        arity: usize,
    ) -> Option<String> {
        match scope.and_then(visit::root_name) {
            Some(root) => {
                let rr = self.root_of(root);
                if self.tracked(&rr) {
                    return Some(rr);
                }
                if root == self.cut_class {
                    return Some(self.cut_class.clone());
                }
                if matches!(
                    self.production.map(|p| p.resolve(name, arity)),
                    Some(Resolution::Resolved(_))
                ) {
                    self.alias_root.entry(rr.clone()).or_insert_with(|| rr.clone());
                    return Some(rr);
                }
                None
            }
            None => {
                if matches!(
                    self.production.map(|p| p.resolve(name, arity)),
                    Some(Resolution::Resolved(_))
                ) {
                    Some(self.cut_class.clone())
                } else {
                    None
                }
            }
        }
    }

    fn handle_assertion(&mut self, name: &str, args: &[Expr]) {
        let Some(family) = assertions::classify(name) else {
            return;
        };
        let observed = assertions::observed_argument(family, args);
        let mut observed_ids = Vec::new();
        for arg in args {
            let (ids, _) = self.register_calls_in(arg);
            if observed.is_some_and(|o| std::ptr::eq(o, arg)) {
                observed_ids = ids;
            }
        }
        let assert_pos = self.bump_position();
        if let Some(obs) = observed {
            self.bind_observed(obs, &observed_ids, assert_pos);
        }
    }

    /// Bind the observed expression to the call(s) it depends on, in
    /// rule priority order.
    fn bind_observed(&mut self, observed: &Expr, observed_ids: &[usize], pos: usize) {
        let obs = observed.unwrapped();

        // (a) a bare variable holding a prior call's return value
        if let Some(var) = obs.as_simple_name() {
            let root = self.root_of(var);
            if let Some(&cid) = self.value_from_call.get(&root) {
                self.bind_through_getter(cid, pos, BindRule::ReturnVar);
                return;
            }
        }

        // (b) calls on the class under test inside the expression
        if !observed_ids.is_empty() {
            for &cid in observed_ids {
                self.bind_through_getter(cid, pos, BindRule::DirectCall);
            }
            return;
        }

        // (c) receiver chain rooted at a tracked variable
        if let Some(root) = visit::root_name(obs) {
            let root = self.root_of(root);
            if self.tracked(&root) {
                if let Some(pid) = self.nearest_producer(&root, pos) {
                    self.bindings.push(AssertBinding {
                        call_id: pid,
                        rule: BindRule::NearestProducer,
                    });
                    return;
                }
            }
            // (d) root variable holds a tracked call value
            if let Some(&cid) = self.value_from_call.get(&root) {
                self.bindings.push(AssertBinding {
                    call_id: cid,
                    rule: BindRule::DerivedFrom,
                });
            }
        }
    }

    /// Bind to `cid`, applying getter transparency: a non-mutating
    /// accessor defers to the nearest preceding producer on its
    /// receiver, falling back to a loose self-binding when none exists.
    fn bind_through_getter(&mut self, cid: usize, pos: usize, direct_rule: BindRule) {
        let (is_ctor, method, arity, receiver) = {
            let c = &self.calls[cid];
            (c.is_ctor, c.method.clone(), c.arity, c.receiver.clone())
        };
        if !is_ctor && self.looks_like_getter(&method, arity) {
            let root = self.root_of(&receiver);
            match self.nearest_producer(&root, pos) {
                Some(pid) => self.bindings.push(AssertBinding {
                    call_id: pid,
                    rule: BindRule::NearestProducer,
                }),
                None => self.bindings.push(AssertBinding {
                    call_id: cid,
                    rule: BindRule::GetterNoProducer,
                }),
            }
        } else {
            self.bindings.push(AssertBinding {
                call_id: cid,
                rule: direct_rule,
            });
        }
    }

    /// Highest-positioned constructing or mutating call on `root`
    /// strictly before `before`. Positions are unique, so there are no
    /// ties.
    fn nearest_producer(&self, root: &str, before: usize) -> Option<usize> {
        self.calls
            .iter()
            .filter(|c| c.is_producer() && c.position < before && self.root_of(&c.receiver) == root)
            .max_by_key(|c| c.position)
            .map(|c| c.id)
    }
}
