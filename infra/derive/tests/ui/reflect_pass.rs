use sqlmap_reflection::Reflect;

#[derive(Debug, Clone, Default, Reflect)]
struct Blog {
    id: i64,
    #[reflect(rename = "name")]
    title: String,
    #[reflect(read_only)]
    version: u32,
    #[reflect(write_only)]
    draft: bool,
    #[reflect(skip)]
    cache: Vec<u8>,
}

#[derive(Debug, Clone, Reflect)]
#[reflect(default_constructor)]
struct Post {
    body: String,
}

impl Default for Post {
    fn default() -> Self {
        Self { body: "empty".to_owned() }
    }
}

fn main() {
    let _ = <Blog as sqlmap_reflection::Reflect>::class_shape();
    let _ = <Post as sqlmap_reflection::Reflect>::class_shape();
}
