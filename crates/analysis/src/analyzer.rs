//! Builds the reactive binding table and resolves expression dependencies.
//!
//! Declaration sites (`signal(...)` / `derived(...)`) populate the table;
//! every expression is then resolved against it. An identifier naming a
//! signal contributes itself; one naming a derived binding contributes that
//! binding's memoized transitive signal set. Resolution re-entering a derived
//! binding is a cycle and fails analysis.

use crate::error::AnalysisError;
use marq_syntax::{Component, DeclKind, Expr};
use marq_types::BindingKind;
use std::collections::{BTreeSet, HashMap};

/// One reactive binding declared in a component body.
#[derive(Debug, Clone)]
pub struct ReactiveBinding {
    pub name: String,
    pub kind: BindingKind,
    /// Direct upstream bindings this one reads (empty for signals).
    pub reads: BTreeSet<String>,
}

/// The completed analysis of one component: the binding table plus the
/// memoized transitive signal closure of every binding.
#[derive(Debug)]
pub struct Analysis {
    bindings: Vec<ReactiveBinding>,
    index: HashMap<String, usize>,
    closures: HashMap<String, BTreeSet<String>>,
}

impl Analysis {
    pub fn analyze(component: &Component) -> Result<Self, AnalysisError> {
        let mut bindings: Vec<ReactiveBinding> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for decl in &component.declarations {
            if index.contains_key(&decl.name) {
                return Err(AnalysisError::DuplicateBinding(decl.name.clone()));
            }
            let kind = match decl.kind {
                DeclKind::Signal => BindingKind::Signal,
                DeclKind::Derived => BindingKind::Derived,
            };
            index.insert(decl.name.clone(), bindings.len());
            bindings.push(ReactiveBinding {
                name: decl.name.clone(),
                kind,
                reads: BTreeSet::new(),
            });
        }

        // Record direct reads for derived bindings: free identifiers of the
        // initializer that resolve against the table.
        for decl in &component.declarations {
            if decl.kind == DeclKind::Derived {
                let reads: BTreeSet<String> = decl
                    .init
                    .free_idents()
                    .into_iter()
                    .filter(|name| index.contains_key(name))
                    .collect();
                bindings[index[&decl.name]].reads = reads;
            }
        }

        let mut analysis = Analysis {
            bindings,
            index,
            closures: HashMap::new(),
        };
        analysis.resolve_all()?;

        log::debug!(
            "analyzed component '{}': {} reactive bindings",
            component.name,
            analysis.bindings.len()
        );
        Ok(analysis)
    }

    /// Resolves the transitive signal closure of every binding up front so
    /// later queries are pure lookups.
    fn resolve_all(&mut self) -> Result<(), AnalysisError> {
        let names: Vec<String> = self.bindings.iter().map(|b| b.name.clone()).collect();
        for name in names {
            let mut stack = Vec::new();
            self.resolve(&name, &mut stack)?;
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        name: &str,
        stack: &mut Vec<String>,
    ) -> Result<BTreeSet<String>, AnalysisError> {
        if let Some(done) = self.closures.get(name) {
            return Ok(done.clone());
        }
        if let Some(first) = stack.iter().position(|n| n == name) {
            let mut chain: Vec<String> = stack[first..].to_vec();
            chain.push(name.to_string());
            return Err(AnalysisError::CyclicDependency { chain });
        }

        let (kind, reads) = {
            let binding = &self.bindings[self.index[name]];
            (binding.kind, binding.reads.clone())
        };
        let closure = match kind {
            BindingKind::Signal => BTreeSet::from([name.to_string()]),
            BindingKind::Derived => {
                stack.push(name.to_string());
                let mut closure = BTreeSet::new();
                for upstream in reads {
                    closure.extend(self.resolve(&upstream, stack)?);
                }
                stack.pop();
                closure
            }
        };

        self.closures.insert(name.to_string(), closure.clone());
        Ok(closure)
    }

    pub fn binding(&self, name: &str) -> Option<&ReactiveBinding> {
        self.index.get(name).map(|&i| &self.bindings[i])
    }

    pub fn bindings(&self) -> impl Iterator<Item = &ReactiveBinding> {
        self.bindings.iter()
    }

    /// The transitive signal set one binding resolves to.
    pub fn closure_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.closures.get(name)
    }

    /// The reactive dependency set of an expression: the union of the signal
    /// closures of every binding it reads. Empty means the expression is
    /// static.
    pub fn deps_of(&self, expr: &Expr) -> BTreeSet<String> {
        let mut deps = BTreeSet::new();
        for ident in expr.free_idents() {
            if let Some(closure) = self.closures.get(&ident) {
                deps.extend(closure.iter().cloned());
            }
        }
        deps
    }

    /// True when the expression reads at least one reactive binding.
    pub fn is_reactive(&self, expr: &Expr) -> bool {
        expr.free_idents()
            .iter()
            .any(|ident| self.index.contains_key(ident))
    }
}
