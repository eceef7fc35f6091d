/// An amount of money in the smallest unit of its currency.
pub struct Money {
  pub cents: i64,
  pub currency: String,
}

pub struct Page {
  pub number: u32,
  pub size: u32,
}

pub struct LineItem {
  pub sku: String,
  pub quantity: u32,
  pub price: Money,
}
