use sqlmap_derive::sqlmap_error;

#[sqlmap_error]
pub enum DemoError {
    Io(std::io::Error),
}

fn main() {}
