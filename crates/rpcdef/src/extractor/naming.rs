/// Lowers the first character of an identifier and keeps the rest as written.
///
/// `PlaceOrder` becomes `placeOrder`; `reset_all` and `sent_at` are unchanged.
/// Acronyms keep their tail: `HTTPServer` becomes `hTTPServer`.
pub(crate) fn lower_camel(name: &str) -> String {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) => first.to_lowercase().chain(chars).collect(),
    None => String::new(),
  }
}
