//! Per-scope declarations of mutually exclusive commands.
//!
//! A scope is one block: a `when` body, an `if` branch, a `switch` arm or a
//! `foreach` body. Each scope records which [`SymbolKind`]s it has seen as a
//! bit set. Declaring a kind whose rival is already present is refused and
//! leaves the scope as it was.

use bitflags::bitflags;

bitflags! {
    /// Commands that constrain what else may appear in the same scope.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct SymbolKind: u8 {
        const NODE = 1 << 0;
        const POOL = 1 << 1;
        const HTTP_REDIRECT = 1 << 2;
        const HTTP_RESPOND = 1 << 3;
    }
}

/// Pairs that may not share a scope.
const EXCLUSIVE: &[(SymbolKind, SymbolKind)] = &[
    (SymbolKind::NODE, SymbolKind::POOL),
    (SymbolKind::HTTP_REDIRECT, SymbolKind::HTTP_RESPOND),
];

const NAMES: &[(SymbolKind, &str)] = &[
    (SymbolKind::NODE, "node"),
    (SymbolKind::POOL, "pool"),
    (SymbolKind::HTTP_REDIRECT, "HTTP::redirect"),
    (SymbolKind::HTTP_RESPOND, "HTTP::respond"),
];

impl SymbolKind {
    /// Command name of a single-bit kind.
    pub fn command_name(self) -> &'static str {
        NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("command", |&(_, name)| name)
    }

    /// Kinds that conflict with any bit of `self`.
    pub fn rivals(self) -> SymbolKind {
        EXCLUSIVE
            .iter()
            .fold(SymbolKind::empty(), |acc, &(a, b)| {
                if self.intersects(a) {
                    acc | b
                } else if self.intersects(b) {
                    acc | a
                } else {
                    acc
                }
            })
    }
}

/// A refused declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub declared: SymbolKind,
    pub existing: SymbolKind,
}

impl Conflict {
    pub fn message(&self) -> String {
        format!(
            "'{}' cannot be used in the same scope as '{}'",
            self.declared.command_name(),
            self.existing.command_name()
        )
    }
}

/// Stack of scopes. The outermost scope is never popped.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    scopes: Vec<SymbolKind>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![SymbolKind::empty()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(SymbolKind::empty());
    }

    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Kinds declared in the innermost scope.
    pub fn current(&self) -> SymbolKind {
        self.scopes.last().copied().unwrap_or_default()
    }

    /// Record `kind` in the innermost scope unless a rival is there.
    pub fn declare(&mut self, kind: SymbolKind) -> Result<(), Conflict> {
        let existing = self.current() & kind.rivals();
        if !existing.is_empty() {
            return Err(Conflict {
                declared: kind,
                existing,
            });
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(kind);
        }
        Ok(())
    }
}
