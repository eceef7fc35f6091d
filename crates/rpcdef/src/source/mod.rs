//! Loaded view of the Rust sources a definition is extracted from.
//!
//! The extractor never looks at syntax. It walks a [`ModuleSet`]: every module that
//! was loaded, its public declarations classified into a closed [`Shape`], and every
//! type reference already resolved to the module that owns it.

mod loader;
mod scope;


use std::{collections::BTreeMap, fmt, path::PathBuf};

pub use loader::{LoadError, ModuleLoader, SourceUnit};

/// Location of a declaration in its source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  pub file: PathBuf,
  pub line: usize,
  pub column: usize,
}

impl Position {
  #[must_use]
  pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
    Self {
      file: file.into(),
      line,
      column,
    }
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
  }
}

/// All loaded modules, keyed by module path.
///
/// Root modules are the ones whose declarations are walked. The others are only
/// there so references into them can be resolved.
#[derive(Debug, Clone, Default)]
pub struct ModuleSet {
  modules: BTreeMap<String, Module>,
  roots: Vec<String>,
}

impl ModuleSet {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Parses in-memory sources. Used when the sources do not come from disk.
  pub fn parse(units: &[SourceUnit]) -> Result<Self, LoadError> {
    loader::parse_units(units)
  }

  /// Adds a module. A module inserted twice keeps the later declarations.
  pub fn insert(&mut self, module: Module, root: bool) {
    if root && !self.roots.contains(&module.path) {
      self.roots.push(module.path.clone());
    }
    self.modules.insert(module.path.clone(), module);
  }

  #[must_use]
  pub fn module(&self, path: &str) -> Option<&Module> {
    self.modules.get(path)
  }

  /// Modules to walk, in load order.
  pub fn roots(&self) -> impl Iterator<Item = &Module> {
    self.roots.iter().filter_map(|path| self.modules.get(path))
  }

  #[must_use]
  pub fn declaration(&self, named: &NamedRef) -> Option<&Declaration> {
    self.modules.get(&named.module)?.declarations.get(&named.name)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.modules.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
  /// Short name, the last segment of `path`.
  pub name: String,
  /// `::`-separated module path, e.g. `shop::orders`.
  pub path: String,
  /// Top-level declarations by name.
  pub declarations: BTreeMap<String, Declaration>,
}

impl Module {
  #[must_use]
  pub fn new(path: impl Into<String>) -> Self {
    let path = path.into();
    let name = path.rsplit("::").next().unwrap_or_default().to_string();
    Self {
      name,
      path,
      declarations: BTreeMap::new(),
    }
  }

  pub fn insert(&mut self, declaration: Declaration) {
    self.declarations.insert(declaration.name.clone(), declaration);
  }

  #[must_use]
  pub fn with(mut self, declaration: Declaration) -> Self {
    self.insert(declaration);
    self
  }
}

/// A top-level item of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
  pub name: String,
  pub exported: bool,
  pub position: Position,
  pub comment: String,
  pub shape: Shape,
}

impl Declaration {
  #[must_use]
  pub fn new(name: impl Into<String>, shape: Shape) -> Self {
    Self {
      name: name.into(),
      exported: true,
      position: Position::default(),
      comment: String::new(),
      shape,
    }
  }

  #[must_use]
  pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
    self.comment = comment.into();
    self
  }

  #[must_use]
  pub fn with_position(mut self, position: Position) -> Self {
    self.position = position;
    self
  }

  #[must_use]
  pub fn private(mut self) -> Self {
    self.exported = false;
    self
  }
}

/// What a declaration looks like underneath its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
  /// A trait: an ordered list of methods.
  Interface(Vec<MethodDecl>),
  /// A struct with named fields.
  Record(Vec<FieldDecl>),
  /// A type alias for a sequence, `type Ids = Vec<Id>`.
  Sequence(TypeExpr),
  /// Any other type alias.
  Named(TypeExpr),
  /// Enums, tuple structs, unit structs.
  Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
  pub name: String,
  pub position: Position,
  pub comment: String,
  /// Parameters after the receiver.
  pub params: Vec<TypeExpr>,
  pub results: Vec<TypeExpr>,
}

impl MethodDecl {
  #[must_use]
  pub fn new(name: impl Into<String>, params: Vec<TypeExpr>, results: Vec<TypeExpr>) -> Self {
    Self {
      name: name.into(),
      position: Position::default(),
      comment: String::new(),
      params,
      results,
    }
  }

  #[must_use]
  pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
    self.comment = comment.into();
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
  pub name: String,
  pub exported: bool,
  pub position: Position,
  pub comment: String,
  /// Raw tag string, empty when the field carries none.
  pub tag: String,
  pub ty: TypeExpr,
}

impl FieldDecl {
  #[must_use]
  pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
    Self {
      name: name.into(),
      exported: true,
      position: Position::default(),
      comment: String::new(),
      tag: String::new(),
      ty,
    }
  }

  #[must_use]
  pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
    self.comment = comment.into();
    self
  }

  #[must_use]
  pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
    self.tag = tag.into();
    self
  }

  #[must_use]
  pub fn private(mut self) -> Self {
    self.exported = false;
    self
  }
}

/// A reference to a declaration in a loaded module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamedRef {
  pub module: String,
  pub name: String,
}

/// A resolved type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
  Named(NamedRef),
  Sequence(Box<TypeExpr>),
  Optional(Box<TypeExpr>),
  Map {
    container: String,
    key: Box<TypeExpr>,
    value: Box<TypeExpr>,
  },
  /// Language primitive, spelled as written (`String`, `u32`, ...).
  Primitive(String),
  /// `serde_json::Value`.
  Any,
  /// A path that matched nothing in the loaded modules, kept as written.
  Unresolved(String),
}

impl TypeExpr {
  #[must_use]
  pub fn named(module: impl Into<String>, name: impl Into<String>) -> Self {
    Self::Named(NamedRef {
      module: module.into(),
      name: name.into(),
    })
  }

  #[must_use]
  pub fn primitive(name: impl Into<String>) -> Self {
    Self::Primitive(name.into())
  }

  #[must_use]
  pub fn sequence(inner: Self) -> Self {
    Self::Sequence(Box::new(inner))
  }

  #[must_use]
  pub fn optional(inner: Self) -> Self {
    Self::Optional(Box::new(inner))
  }

  #[must_use]
  pub fn map(container: impl Into<String>, key: Self, value: Self) -> Self {
    Self::Map {
      container: container.into(),
      key: Box::new(key),
      value: Box::new(value),
    }
  }

  /// Renders the type as Rust source. `qualifier` is asked for the prefix of every
  /// named type's module and returns `None` when the type should be written bare.
  pub fn render(&self, qualifier: &mut impl FnMut(&str) -> Option<String>) -> String {
    match self {
      Self::Named(named) => match qualifier(&named.module) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}::{}", named.name),
        _ => named.name.clone(),
      },
      Self::Sequence(inner) => format!("Vec<{}>", inner.render(qualifier)),
      Self::Optional(inner) => format!("Option<{}>", inner.render(qualifier)),
      Self::Map { container, key, value } => {
        format!("{container}<{}, {}>", key.render(qualifier), value.render(qualifier))
      }
      Self::Primitive(name) | Self::Unresolved(name) => name.clone(),
      Self::Any => "serde_json::Value".to_string(),
    }
  }

  /// Renders the type with every module prefix stripped.
  #[must_use]
  pub fn render_bare(&self) -> String {
    self.render(&mut |_| None)
  }
}

impl fmt::Display for TypeExpr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.render_bare())
  }
}
