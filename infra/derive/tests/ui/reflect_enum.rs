use sqlmap_reflection::Reflect;

#[derive(Reflect)]
enum Shape {
    Circle,
}

fn main() {
    let _ = Shape::Circle;
}
