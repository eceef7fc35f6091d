//! A small greeting API.

/// Greeter says hello and goodbye.
pub trait Greeter {
  /// Greet prepares a greeting for a person.
  fn greet(&self, request: GreetRequest) -> GreetResponse;

  /// Farewell says goodbye.
  fn farewell(&self, request: FarewellRequest) -> GreetResponse;
}

/// Admin resets greeter state.
pub trait Admin {
  fn reset_all(&self, request: ResetRequest) -> ResetResponse;
}

/// GreetRequest is the request for Greeter.greet.
pub struct GreetRequest {
  /// Name of the person to greet.
  ///
  /// example: "Mat"
  #[tag = r#"json:"name" validate:"required""#]
  pub name: String,
  /// How many times to say hello.
  /// example: 3
  #[tag = r#"json:"times,omitempty""#]
  pub times: Option<u32>,
  /// Languages to greet in, most preferred first.
  /// example:
  pub languages: Vec<String>,
  pub metadata: std::collections::HashMap<String, serde_json::Value>,
}

/// GreetResponse is the response for Greeter.greet.
pub struct GreetResponse {
  /// The greeting.
  pub greeting: String,
  pub sent_at: Vec<Timestamp>,
}

pub struct FarewellRequest {
  pub name: String,
}

pub struct ResetRequest {
  pub everything: bool,
}

pub struct ResetResponse {
  pub affected: u64,
}

/// Timestamp of an event.
pub struct Timestamp {
  pub seconds: i64,
  pub nanos: i32,
}

pub type Names = Vec<String>;

pub enum Mood {
  Happy,
  Sad,
}

struct Hidden {
  pub x: u8,
}
