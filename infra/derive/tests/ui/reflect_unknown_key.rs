use sqlmap_reflection::Reflect;

#[derive(Reflect)]
struct Blog {
    #[reflect(nullable)]
    id: i64,
}

fn main() {
    let _ = Blog { id: 1 }.id;
}
