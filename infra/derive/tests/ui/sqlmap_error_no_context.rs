use sqlmap_derive::sqlmap_error;

#[sqlmap_error]
pub enum DemoError {
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

fn main() {}
