use sqlmap_reflection::{BoundedCache, ClassId, ClassShape, MetadataCache, PropertyDecl, Reflect, ReflectionError, ReflectorFactory};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(default_constructor)]
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
struct Comment {
    body: String,
}

#[derive(Debug, Clone, Default, Reflect)]
struct Tag {
    label: String,
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

struct Broken {
    id: i64,
}

impl Reflect for Broken {
    fn class_shape() -> ClassShape {
        ClassShape::of::<Self>()
            .property(PropertyDecl::read_only::<Self, i64>("id", |b| &b.id))
            .property(PropertyDecl::read_only::<Self, i64>("id", |b| &b.id))
    }
}

#[test]
fn derived_properties_follow_field_attributes() {
    let meta = ReflectorFactory::new().find_for_class::<Blog>().unwrap();

    assert_eq!(meta.readable_property_names(), ["id", "name", "version"]);
    assert_eq!(meta.writable_property_names(), ["draft", "id", "name"]);
    assert!(!meta.has_getter("cache"));
    assert!(!meta.has_getter("title"));
    assert_eq!(meta.getter_type("version").unwrap(), ClassId::of::<u32>());
}

#[test]
fn derived_accessors_read_and_write_fields() {
    let meta = ReflectorFactory::new().find_for_class::<Blog>().unwrap();
    let mut blog = Blog { id: 1, title: "Draft".to_owned(), version: 3, ..Blog::default() };

    meta.set_value(&mut blog, "name", "Published".to_owned()).unwrap();
    meta.set_value(&mut blog, "draft", true).unwrap();

    assert_eq!(blog.title, "Published");
    assert!(blog.draft);
    assert_eq!(meta.get_value::<u32>(&blog, "version").unwrap(), 3);
    assert!(matches!(
        meta.set_value(&mut blog, "version", 4_u32),
        Err(ReflectionError::PropertyNotFound { accessor: "setter", .. })
    ));
}

#[test]
fn default_constructor_is_opt_in() {
    let factory = ReflectorFactory::new();

    let blog = factory.find_for_class::<Blog>().unwrap().instantiate().unwrap();
    assert_eq!(blog.downcast_ref::<Blog>(), Some(&Blog::default()));

    let post = factory.find_for_class::<Post>().unwrap().instantiate().unwrap();
    assert_eq!(post.downcast_ref::<Post>().map(|p| p.body.as_str()), Some("empty"));

    assert!(!factory.find_for_class::<Comment>().unwrap().has_default_constructor());

    let tag = factory.find_for_class::<Tag>().unwrap();
    assert!(!tag.has_default_constructor());
    assert!(matches!(tag.instantiate(), Err(ReflectionError::Introspection { .. })));
    assert_eq!(tag.readable_property_names(), ["label"]);
}

#[test]
fn repeated_lookups_share_one_instance() {
    let factory = ReflectorFactory::new();

    let first = factory.find_for_class::<Blog>().unwrap();
    let second = factory.find_for_class::<Blog>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(factory.introspections(), 1);
    assert_eq!(factory.cached_classes(), 1);
}

#[test]
fn disabled_cache_recomputes_every_time() {
    let factory = ReflectorFactory::new();
    factory.set_class_cache_enabled(false);

    let first = factory.find_for_class::<Blog>().unwrap();
    let second = factory.find_for_class::<Blog>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.readable_property_names(), second.readable_property_names());
    assert_eq!(factory.introspections(), 2);
    assert_eq!(factory.cached_classes(), 0);
}

#[test]
fn invalid_shapes_fail_and_are_retried() {
    let factory = ReflectorFactory::new();

    assert!(matches!(factory.find_for_class::<Broken>(), Err(ReflectionError::Introspection { .. })));
    assert!(factory.find_for_class::<Broken>().is_err());
    assert_eq!(factory.introspections(), 2);
    assert_eq!(factory.cached_classes(), 0);
}

#[test]
fn concurrent_lookups_observe_one_instance() {
    let factory = Arc::new(ReflectorFactory::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || factory.find_for_class::<Blog>().unwrap())
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let cached = factory.find_for_class::<Blog>().unwrap();
    assert!(results.iter().all(|m| Arc::ptr_eq(m, &cached)));
    assert_eq!(factory.cached_classes(), 1);
}

#[test]
fn bounded_cache_plugs_into_the_factory() {
    let cache = Arc::new(BoundedCache::new(16));
    let factory = ReflectorFactory::with_cache(Arc::clone(&cache) as Arc<dyn MetadataCache>);

    let first = factory.find_for_class::<Comment>().unwrap();
    let second = factory.find_for_class::<Comment>().unwrap();
    factory.find_for_class::<Post>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 2);
    assert_eq!(factory.introspections(), 2);
}
