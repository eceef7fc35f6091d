use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
};

use syn::{Attribute, Expr, ExprLit, Fields, FnArg, Item, Lit, Meta, ReturnType, TraitItem, Type, Visibility};
use walkdir::WalkDir;

use super::{
  Declaration, FieldDecl, MethodDecl, Module, ModuleSet, Position, Shape, TypeExpr,
  scope::{ModuleScope, PathResolver, ScopeIndex},
};

const TAG_ATTRIBUTE: &str = "tag";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  #[error("{}: {source}", .path.display())]
  Io { path: PathBuf, source: std::io::Error },
  #[error(transparent)]
  Walk(#[from] walkdir::Error),
  #[error("{position}: {source}")]
  Parse { position: Position, source: syn::Error },
  #[error("{}: not a Rust source file", .0.display())]
  NotRustSource(PathBuf),
  #[error("no Rust sources found in {}", .0.display())]
  Empty(PathBuf),
}

/// One source file to load, with the module path it is mounted at.
#[derive(Debug, Clone)]
pub struct SourceUnit {
  pub module_path: String,
  /// Module path `crate::` resolves to from inside this file.
  pub crate_root: String,
  pub file: PathBuf,
  pub text: String,
  /// Whether declarations of this unit are walked, or only used for resolution.
  pub root: bool,
}

impl SourceUnit {
  #[must_use]
  pub fn new(module_path: impl Into<String>, file: impl Into<PathBuf>, text: impl Into<String>) -> Self {
    let module_path = module_path.into();
    let crate_root = module_path.split("::").next().unwrap_or_default().to_string();
    Self {
      module_path,
      crate_root,
      file: file.into(),
      text: text.into(),
      root: true,
    }
  }

  #[must_use]
  pub fn support(mut self) -> Self {
    self.root = false;
    self
  }
}

/// Loads Rust sources from files and directories into a [`ModuleSet`].
#[derive(Debug, Clone, Default)]
pub struct ModuleLoader {
  patterns: Vec<PathBuf>,
  includes: Vec<PathBuf>,
}

impl ModuleLoader {
  #[must_use]
  pub fn new(patterns: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
    Self {
      patterns: patterns.into_iter().map(Into::into).collect(),
      includes: vec![],
    }
  }

  /// Adds paths loaded only to resolve references, never walked.
  #[must_use]
  pub fn with_includes(mut self, includes: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
    self.includes.extend(includes.into_iter().map(Into::into));
    self
  }

  pub async fn load(&self) -> Result<ModuleSet, LoadError> {
    let mut units = vec![];
    for pattern in &self.patterns {
      units.extend(discover(pattern).await?);
    }
    for include in &self.includes {
      units.extend(discover(include).await?.into_iter().map(SourceUnit::support));
    }
    parse_units(&units)
  }
}

async fn discover(pattern: &Path) -> Result<Vec<SourceUnit>, LoadError> {
  let metadata = tokio::fs::metadata(pattern).await.map_err(|source| LoadError::Io {
    path: pattern.to_path_buf(),
    source,
  })?;

  if metadata.is_file() {
    if pattern.extension() != Some(OsStr::new("rs")) {
      return Err(LoadError::NotRustSource(pattern.to_path_buf()));
    }
    let module_path = file_module_name(pattern);
    let text = read_source(pattern).await?;
    return Ok(vec![SourceUnit::new(module_path, pattern, text)]);
  }

  let crate_root = dir_module_name(pattern);
  let mut units = vec![];
  for entry in WalkDir::new(pattern).sort_by_file_name() {
    let entry = entry?;
    let path = entry.path();
    if !entry.file_type().is_file() || path.extension() != Some(OsStr::new("rs")) {
      continue;
    }
    let relative = path.strip_prefix(pattern).unwrap_or(path);
    let module_path = nested_module_path(&crate_root, relative);
    let text = read_source(path).await?;
    let mut unit = SourceUnit::new(module_path, path, text);
    unit.crate_root.clone_from(&crate_root);
    units.push(unit);
  }

  if units.is_empty() {
    return Err(LoadError::Empty(pattern.to_path_buf()));
  }
  Ok(units)
}

async fn read_source(path: &Path) -> Result<String, LoadError> {
  tokio::fs::read_to_string(path).await.map_err(|source| LoadError::Io {
    path: path.to_path_buf(),
    source,
  })
}

fn sanitize_segment(segment: &str) -> String {
  segment.replace('-', "_")
}

fn dir_module_name(dir: &Path) -> String {
  let name = dir.file_name().and_then(OsStr::to_str).unwrap_or("crate");
  if name == "src"
    && let Some(parent) = dir.parent().and_then(Path::file_name).and_then(OsStr::to_str)
  {
    return sanitize_segment(parent);
  }
  sanitize_segment(name)
}

fn file_module_name(file: &Path) -> String {
  match file.file_stem().and_then(OsStr::to_str) {
    Some("lib" | "main" | "mod") => file.parent().map_or_else(|| "crate".to_string(), dir_module_name),
    Some(stem) => sanitize_segment(stem),
    None => "crate".to_string(),
  }
}

/// `api/orders.rs` under root `shop` is `shop::api::orders`; `mod.rs`, `lib.rs` and
/// `main.rs` belong to their directory.
pub(super) fn nested_module_path(crate_root: &str, relative: &Path) -> String {
  let mut segments = vec![crate_root.to_string()];
  let components: Vec<&str> = relative.iter().filter_map(OsStr::to_str).collect();
  let Some((file, dirs)) = components.split_last() else {
    return crate_root.to_string();
  };
  segments.extend(dirs.iter().map(|dir| sanitize_segment(dir)));
  let stem = file.strip_suffix(".rs").unwrap_or(file);
  let at_root = dirs.is_empty();
  match stem {
    "mod" => {}
    "lib" | "main" if at_root => {}
    other => segments.push(sanitize_segment(other)),
  }
  segments.join("::")
}

/// Items of one module, gathered from a file or an inline `mod` block.
struct RawModule {
  path: String,
  crate_root: String,
  file: PathBuf,
  root: bool,
  items: Vec<Item>,
}

/// Parses units into modules and resolves every type reference between them.
pub(super) fn parse_units(units: &[SourceUnit]) -> Result<ModuleSet, LoadError> {
  let mut raw_modules = vec![];
  for unit in units {
    let file = syn::parse_file(&unit.text).map_err(|source| LoadError::Parse {
      position: span_position(&unit.file, source.span()),
      source,
    })?;
    flatten_modules(
      RawModule {
        path: unit.module_path.clone(),
        crate_root: unit.crate_root.clone(),
        file: unit.file.clone(),
        root: unit.root,
        items: file.items,
      },
      &mut raw_modules,
    );
  }

  let mut index = ScopeIndex::default();
  for raw in &raw_modules {
    index.insert(raw.path.clone(), ModuleScope::new(&raw.crate_root));
  }
  for raw in &raw_modules {
    let Some(scope) = index.scope_mut(&raw.path) else {
      continue;
    };
    for item in &raw.items {
      match item {
        Item::Use(item_use) => scope.add_use(&item_use.tree),
        Item::Struct(item) => {
          scope.types.insert(item.ident.to_string());
        }
        Item::Enum(item) => {
          scope.types.insert(item.ident.to_string());
        }
        Item::Trait(item) => {
          scope.types.insert(item.ident.to_string());
        }
        Item::Type(item) => {
          scope.types.insert(item.ident.to_string());
        }
        _ => {}
      }
    }
  }

  let mut modules = ModuleSet::new();
  for raw in &raw_modules {
    let resolver = index.resolver(&raw.path);
    let mut module = Module::new(&raw.path);
    for item in &raw.items {
      if let Some(declaration) = declaration(item, &resolver, &raw.file) {
        module.insert(declaration);
      }
    }
    modules.insert(module, raw.root);
  }
  Ok(modules)
}

fn flatten_modules(mut raw: RawModule, out: &mut Vec<RawModule>) {
  let items = std::mem::take(&mut raw.items);
  let mut kept = Vec::with_capacity(items.len());
  let mut nested = vec![];
  for item in items {
    match item {
      Item::Mod(syn::ItemMod {
        ident,
        content: Some((_, content)),
        ..
      }) => {
        nested.push(RawModule {
          path: format!("{}::{ident}", raw.path),
          crate_root: raw.crate_root.clone(),
          file: raw.file.clone(),
          root: raw.root,
          items: content,
        });
      }
      other => kept.push(other),
    }
  }
  raw.items = kept;
  out.push(raw);
  for child in nested {
    flatten_modules(child, out);
  }
}

fn declaration(item: &Item, resolver: &PathResolver<'_>, file: &Path) -> Option<Declaration> {
  let (ident, vis, attrs, shape) = match item {
    Item::Struct(item) => {
      let shape = match &item.fields {
        Fields::Named(named) => Shape::Record(
          named
            .named
            .iter()
            .filter_map(|field| {
              let ident = field.ident.as_ref()?;
              Some(FieldDecl {
                name: ident.to_string(),
                exported: is_exported(&field.vis),
                position: span_position(file, ident.span()),
                comment: doc_comment(&field.attrs),
                tag: tag_string(&field.attrs),
                ty: resolver.resolve(&field.ty),
              })
            })
            .collect(),
        ),
        Fields::Unnamed(_) | Fields::Unit => Shape::Opaque,
      };
      (&item.ident, &item.vis, &item.attrs, shape)
    }
    Item::Trait(item) => {
      let methods = item
        .items
        .iter()
        .filter_map(|trait_item| match trait_item {
          TraitItem::Fn(method) => Some(method_decl(method, resolver, file)),
          _ => None,
        })
        .collect();
      (&item.ident, &item.vis, &item.attrs, Shape::Interface(methods))
    }
    Item::Type(item) => {
      let shape = match resolver.resolve(&item.ty) {
        TypeExpr::Sequence(inner) => Shape::Sequence(*inner),
        other => Shape::Named(other),
      };
      (&item.ident, &item.vis, &item.attrs, shape)
    }
    Item::Enum(item) => (&item.ident, &item.vis, &item.attrs, Shape::Opaque),
    _ => return None,
  };

  Some(Declaration {
    name: ident.to_string(),
    exported: is_exported(vis),
    position: span_position(file, ident.span()),
    comment: doc_comment(attrs),
    shape,
  })
}

fn method_decl(method: &syn::TraitItemFn, resolver: &PathResolver<'_>, file: &Path) -> MethodDecl {
  let params = method
    .sig
    .inputs
    .iter()
    .filter_map(|input| match input {
      FnArg::Typed(arg) => Some(resolver.resolve(&arg.ty)),
      FnArg::Receiver(_) => None,
    })
    .collect();

  let results = match &method.sig.output {
    ReturnType::Default => vec![],
    ReturnType::Type(_, ty) => match ty.as_ref() {
      Type::Tuple(tuple) => tuple.elems.iter().map(|elem| resolver.resolve(elem)).collect(),
      other => vec![resolver.resolve(other)],
    },
  };

  MethodDecl {
    name: method.sig.ident.to_string(),
    position: span_position(file, method.sig.ident.span()),
    comment: doc_comment(&method.attrs),
    params,
    results,
  }
}

fn is_exported(vis: &Visibility) -> bool {
  matches!(vis, Visibility::Public(_))
}

fn span_position(file: &Path, span: proc_macro2::Span) -> Position {
  let start = span.start();
  Position::new(file, start.line, start.column + 1)
}

fn string_value(attr: &Attribute) -> Option<String> {
  let Meta::NameValue(meta) = &attr.meta else {
    return None;
  };
  match &meta.value {
    Expr::Lit(ExprLit { lit: Lit::Str(lit), .. }) => Some(lit.value()),
    _ => None,
  }
}

/// Joins `///` lines, dropping the single space rustdoc leaves after the slashes.
fn doc_comment(attrs: &[Attribute]) -> String {
  let lines: Vec<String> = attrs
    .iter()
    .filter(|attr| attr.path().is_ident("doc"))
    .filter_map(string_value)
    .flat_map(|value| {
      value
        .lines()
        .map(|line| line.strip_prefix(' ').unwrap_or(line).to_string())
        .collect::<Vec<_>>()
    })
    .collect();
  lines.join("\n").trim().to_string()
}

fn tag_string(attrs: &[Attribute]) -> String {
  attrs
    .iter()
    .filter(|attr| attr.path().is_ident(TAG_ATTRIBUTE))
    .filter_map(string_value)
    .collect::<Vec<_>>()
    .join(" ")
}
