use sqlmap_derive::sqlmap_error;

#[sqlmap_error]
pub enum DemoError {
    #[error("Lookup failed for {key}")]
    Lookup { key: String, context: String },
}

fn main() {}
