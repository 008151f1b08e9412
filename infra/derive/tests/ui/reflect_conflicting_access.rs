use sqlmap_reflection::Reflect;

#[derive(Reflect)]
struct Blog {
    #[reflect(read_only, write_only)]
    id: i64,
}

fn main() {
    let _ = Blog { id: 1 }.id;
}
