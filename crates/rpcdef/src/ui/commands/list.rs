use anyhow::Context;
use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};
use rpcdef::{
  extractor::{ExtractConfig, Orchestrator},
  source::ModuleLoader,
};
use rpcdef_support::Definition;

use crate::ui::{Colors, ListServicesCommand, colors::Role, term_width};

#[derive(Debug, Clone, PartialEq, Eq)]
struct MethodRow {
  service: String,
  method: String,
  request: String,
  response: String,
}

/// One row per method, services in definition order (sorted by name).
fn method_rows(definition: &Definition) -> Vec<MethodRow> {
  definition
    .services
    .iter()
    .flat_map(|service| {
      service.methods.iter().map(|method| MethodRow {
        service: service.name.clone(),
        method: method.name.clone(),
        request: method.input_object.type_name.clone(),
        response: method.output_object.type_name.clone(),
      })
    })
    .collect()
}

fn build_table(rows: Vec<MethodRow>, colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["SERVICE", "METHOD", "REQUEST", "RESPONSE"] {
    header.add_cell(Cell::new(title).fg(colors.comfy(Role::Label)));
  }
  table.set_header(header);

  let mut previous = None;
  for row in rows {
    let service = if previous.as_ref() == Some(&row.service) {
      String::new()
    } else {
      row.service.clone()
    };
    previous = Some(row.service);

    let mut table_row = Row::new();
    table_row.add_cell(
      Cell::new(service)
        .fg(colors.comfy(Role::Service))
        .add_attribute(Attribute::Bold),
    );
    table_row.add_cell(Cell::new(row.method).fg(colors.comfy(Role::Method)));
    table_row.add_cell(Cell::new(row.request).fg(colors.comfy(Role::Object)));
    table_row.add_cell(Cell::new(row.response).fg(colors.comfy(Role::Object)));
    table.add_row(table_row);
  }

  table
}

pub async fn list_services(command: &ListServicesCommand, colors: &Colors) -> anyhow::Result<()> {
  let modules = ModuleLoader::new(&command.patterns)
    .with_includes(&command.include)
    .load()
    .await
    .context("failed to load Rust sources")?;
  let (definition, _) = Orchestrator::new(&modules, ExtractConfig::default())
    .extract()
    .context("failed to extract RPC definition")?;

  println!("{}", build_table(method_rows(&definition), colors));

  Ok(())
}
