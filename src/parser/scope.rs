//! Lexical scopes and symbols
//!
//! Scopes form a strict tree (global → function body → nested blocks). They
//! live in a single arena owned by [`ScopeTable`] and refer to their parent
//! through a [`ScopeId`] handle, so there are no ownership cycles and a
//! lookup costs one hash probe per enclosing scope.
//!
//! Every [`Symbol`] belongs to exactly one scope. Shadowing a name in an
//! inner scope adds a new symbol there and leaves the outer one untouched.

use super::ast::BasicType;
use super::position::Pos;
use rustc_hash::FxHashMap;
use std::fmt;

/// Handle to a scope inside a [`ScopeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

/// Handle to a symbol inside a [`ScopeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Constant,
    Function,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Variable => write!(f, "variable"),
            SymbolKind::Constant => write!(f, "constant"),
            SymbolKind::Function => write!(f, "function"),
        }
    }
}

/// Metadata for one declared name.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Declared type; the return type for functions.
    pub ty: BasicType,
    /// Parameter type, functions only.
    pub param: Option<BasicType>,
    /// Where the name was declared.
    pub decl: Pos,
}

impl Symbol {
    pub fn variable(name: impl Into<String>, ty: BasicType, decl: Pos) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Variable,
            ty,
            param: None,
            decl,
        }
    }

    pub fn function(name: impl Into<String>, ret: BasicType, param: BasicType, decl: Pos) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Function,
            ty: ret,
            param: Some(param),
            decl,
        }
    }

    pub fn is_function(&self) -> bool {
        self.kind == SymbolKind::Function
    }
}

#[derive(Debug, Clone, Default)]
struct Scope {
    parent: Option<ScopeId>,
    table: FxHashMap<String, SymbolId>,
}

/// Arena holding every scope and symbol created during one parse.
#[derive(Debug, Clone, Default)]
pub struct ScopeTable {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
    /// Owning scope of each symbol, indexed like `symbols`.
    owners: Vec<ScopeId>,
}

impl ScopeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scope linked to `parent` (`None` for a root).
    pub fn new_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent,
            table: FxHashMap::default(),
        });
        id
    }

    /// Add `symbol` to `scope` unless that scope already declares the name.
    ///
    /// Returns the new symbol's id, or `Err` with the symbol already bound
    /// to the name in this very scope. Ancestor scopes are never consulted.
    pub fn insert(&mut self, scope: ScopeId, symbol: Symbol) -> Result<SymbolId, SymbolId> {
        if let Some(&existing) = self.scopes[scope.0 as usize].table.get(&symbol.name) {
            return Err(existing);
        }
        let id = SymbolId(self.symbols.len() as u32);
        self.scopes[scope.0 as usize]
            .table
            .insert(symbol.name.clone(), id);
        self.symbols.push(symbol);
        self.owners.push(scope);
        Ok(id)
    }

    /// Resolve `name` starting at `scope` and walking outwards.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0 as usize];
            if let Some(&symbol) = scope.table.get(name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// Resolve `name` in `scope` only.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scopes[scope.0 as usize].table.get(name).copied()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0 as usize].parent
    }

    /// Scope that owns `symbol`.
    pub fn scope_of(&self, symbol: SymbolId) -> ScopeId {
        self.owners[symbol.0 as usize]
    }

    /// Number of symbols declared directly in `scope`.
    pub fn symbol_count(&self, scope: ScopeId) -> usize {
        self.scopes[scope.0 as usize].table.len()
    }

    /// Number of scopes created so far.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
