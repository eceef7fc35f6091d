use std::collections::{BTreeMap, BTreeSet};

use quote::ToTokens;
use syn::{GenericArgument, PathArguments, Type, UseTree};

use super::{NamedRef, TypeExpr};

const SEQUENCE_CONTAINERS: &[&str] = &["Vec", "VecDeque", "HashSet", "BTreeSet", "IndexSet"];
const MAP_CONTAINERS: &[&str] = &["HashMap", "BTreeMap", "IndexMap"];
const TRANSPARENT_WRAPPERS: &[&str] = &["Box", "Arc", "Rc", "Cow"];
const STD_ROOTS: &[&str] = &["std", "core", "alloc", "indexmap"];

const PRIMITIVES: &[&str] = &[
  "String", "str", "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
  "usize", "f32", "f64",
];

/// Names visible inside one module: what it declares, and what it imports.
#[derive(Debug, Clone, Default)]
pub(super) struct ModuleScope {
  pub(super) crate_root: String,
  pub(super) types: BTreeSet<String>,
  uses: BTreeMap<String, Vec<String>>,
  globs: Vec<Vec<String>>,
}

impl ModuleScope {
  pub(super) fn new(crate_root: impl Into<String>) -> Self {
    Self {
      crate_root: crate_root.into(),
      ..Default::default()
    }
  }

  pub(super) fn add_use(&mut self, tree: &UseTree) {
    self.collect_use(tree, &mut Vec::new());
  }

  fn collect_use(&mut self, tree: &UseTree, prefix: &mut Vec<String>) {
    match tree {
      UseTree::Path(path) => {
        prefix.push(path.ident.to_string());
        self.collect_use(&path.tree, prefix);
        prefix.pop();
      }
      UseTree::Name(name) => {
        let ident = name.ident.to_string();
        if ident == "self" {
          if let Some(last) = prefix.last() {
            self.uses.insert(last.clone(), prefix.clone());
          }
        } else {
          let mut full = prefix.clone();
          full.push(ident.clone());
          self.uses.insert(ident, full);
        }
      }
      UseTree::Rename(rename) => {
        let mut full = prefix.clone();
        if rename.ident != "self" {
          full.push(rename.ident.to_string());
        }
        self.uses.insert(rename.rename.to_string(), full);
      }
      UseTree::Glob(_) => self.globs.push(prefix.clone()),
      UseTree::Group(group) => {
        for item in &group.items {
          self.collect_use(item, prefix);
        }
      }
    }
  }
}

/// Scopes of every loaded module, keyed by module path.
#[derive(Debug, Clone, Default)]
pub(super) struct ScopeIndex {
  scopes: BTreeMap<String, ModuleScope>,
}

impl ScopeIndex {
  pub(super) fn insert(&mut self, path: String, scope: ModuleScope) {
    self.scopes.insert(path, scope);
  }

  pub(super) fn scope_mut(&mut self, path: &str) -> Option<&mut ModuleScope> {
    self.scopes.get_mut(path)
  }

  fn declares(&self, module: &str, name: &str) -> bool {
    self.scopes.get(module).is_some_and(|scope| scope.types.contains(name))
  }

  pub(super) fn resolver<'a>(&'a self, module: &'a str) -> PathResolver<'a> {
    PathResolver { index: self, module }
  }
}

/// Resolves type syntax written inside one module into [`TypeExpr`]s.
pub(super) struct PathResolver<'a> {
  index: &'a ScopeIndex,
  module: &'a str,
}

impl PathResolver<'_> {
  pub(super) fn resolve(&self, ty: &Type) -> TypeExpr {
    match ty {
      Type::Path(type_path) if type_path.qself.is_none() => self.resolve_path(&type_path.path),
      Type::Reference(reference) => self.resolve(&reference.elem),
      Type::Slice(slice) => TypeExpr::sequence(self.resolve(&slice.elem)),
      Type::Array(array) => TypeExpr::sequence(self.resolve(&array.elem)),
      Type::Paren(paren) => self.resolve(&paren.elem),
      Type::Group(group) => self.resolve(&group.elem),
      other => TypeExpr::Unresolved(render_tokens(other)),
    }
  }

  fn scope(&self) -> Option<&ModuleScope> {
    self.index.scopes.get(self.module)
  }

  fn resolve_path(&self, path: &syn::Path) -> TypeExpr {
    let segments: Vec<String> = path.segments.iter().map(|segment| segment.ident.to_string()).collect();
    let Some(last) = path.segments.last() else {
      return TypeExpr::Unresolved(render_tokens(path));
    };
    let name = last.ident.to_string();
    let args = type_arguments(&last.arguments);

    let builtin_path = segments.len() == 1 || STD_ROOTS.contains(&segments[0].as_str());
    if builtin_path && let Some(builtin) = self.resolve_builtin(&name, &args) {
      return builtin;
    }

    match segments.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
      ["serde_json", "Value"] => return TypeExpr::Any,
      ["serde_json", "Map"] if args.len() == 2 => {
        return TypeExpr::map("serde_json::Map", self.resolve(args[0]), self.resolve(args[1]));
      }
      _ => {}
    }

    if let Some(named) = self.lookup(&segments) {
      return TypeExpr::Named(named);
    }

    if segments.len() == 1 && name == "Value" {
      return TypeExpr::Any;
    }

    TypeExpr::Unresolved(render_tokens(path))
  }

  fn resolve_builtin(&self, name: &str, args: &[&Type]) -> Option<TypeExpr> {
    match args {
      [inner] if SEQUENCE_CONTAINERS.contains(&name) => Some(TypeExpr::sequence(self.resolve(inner))),
      [inner] if name == "Option" => Some(TypeExpr::optional(self.resolve(inner))),
      [inner] if TRANSPARENT_WRAPPERS.contains(&name) => Some(self.resolve(inner)),
      [key, value] if MAP_CONTAINERS.contains(&name) => {
        Some(TypeExpr::map(name, self.resolve(key), self.resolve(value)))
      }
      [] if PRIMITIVES.contains(&name) => Some(TypeExpr::primitive(name)),
      _ => None,
    }
  }

  /// Finds the loaded declaration a path refers to.
  pub(super) fn lookup(&self, segments: &[String]) -> Option<NamedRef> {
    let (name, prefix) = segments.split_last()?;
    let scope = self.scope()?;

    if prefix.is_empty() {
      if scope.types.contains(name) {
        return Some(NamedRef {
          module: self.module.to_string(),
          name: name.clone(),
        });
      }
      if let Some(full) = scope.uses.get(name) {
        let (target, target_prefix) = full.split_last()?;
        return self.find_in(target_prefix, target);
      }
      return scope.globs.iter().find_map(|glob| self.find_in(glob, name));
    }

    let mut prefix = prefix.to_vec();
    if !is_path_keyword(&prefix[0])
      && let Some(full) = scope.uses.get(&prefix[0])
    {
      prefix.splice(0..1, full.iter().cloned());
    }
    self.find_in(&prefix, name)
  }

  fn find_in(&self, module_segments: &[String], name: &str) -> Option<NamedRef> {
    self
      .candidate_modules(module_segments)
      .into_iter()
      .find(|module| self.index.declares(module, name))
      .map(|module| NamedRef {
        module,
        name: name.to_string(),
      })
  }

  /// Module paths a relative path may point at, most specific first.
  fn candidate_modules(&self, segments: &[String]) -> Vec<String> {
    let Some(scope) = self.scope() else {
      return vec![];
    };
    let Some(first) = segments.first() else {
      return vec![self.module.to_string()];
    };

    match first.as_str() {
      "crate" => vec![join(&scope.crate_root, &segments[1..])],
      "self" => vec![join(self.module, &segments[1..])],
      "super" => {
        let mut base: Vec<&str> = self.module.split("::").collect();
        let mut rest = segments;
        while let Some(("super", tail)) = rest.split_first().map(|(head, tail)| (head.as_str(), tail)) {
          base.pop();
          rest = tail;
        }
        vec![join(&base.join("::"), rest)]
      }
      _ => vec![
        join(self.module, segments),
        join(&scope.crate_root, segments),
        segments.join("::"),
      ],
    }
  }
}

fn is_path_keyword(segment: &str) -> bool {
  matches!(segment, "crate" | "self" | "super")
}

fn join(base: &str, rest: &[String]) -> String {
  match (base.is_empty(), rest.is_empty()) {
    (_, true) => base.to_string(),
    (true, false) => rest.join("::"),
    (false, false) => format!("{base}::{}", rest.join("::")),
  }
}

fn type_arguments(arguments: &PathArguments) -> Vec<&Type> {
  let PathArguments::AngleBracketed(generics) = arguments else {
    return vec![];
  };
  generics
    .args
    .iter()
    .filter_map(|arg| match arg {
      GenericArgument::Type(ty) => Some(ty),
      _ => None,
    })
    .collect()
}

/// Token rendering with the spacing `quote` inserts around punctuation removed.
pub(super) fn render_tokens(tokens: &impl ToTokens) -> String {
  tokens
    .to_token_stream()
    .to_string()
    .replace(" :: ", "::")
    .replace(":: ", "::")
    .replace(" < ", "<")
    .replace(" <", "<")
    .replace("< ", "<")
    .replace(" >", ">")
    .replace(" ,", ",")
    .replace("& ", "&")
}
