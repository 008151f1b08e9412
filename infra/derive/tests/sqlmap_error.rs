use std::borrow::Cow;

#[sqlmap_derive::sqlmap_error]
pub enum LoaderError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Missing {key}{}", format_context(.context))]
    Missing { key: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn missing() -> Result<(), LoaderError> {
    Err(LoaderError::Missing { key: "a.b".to_owned(), context: None })
}

#[test]
fn context_is_attached_to_own_variants() {
    let err = missing().context("resolving statement").unwrap_err();
    assert_eq!(err.to_string(), "Missing a.b (resolving statement)");
}

#[test]
fn source_errors_convert_with_context() {
    let io: Result<(), std::io::Error> = Err(std::io::Error::other("disk"));
    let err = io.context("reading settings").unwrap_err();

    assert!(matches!(err, LoaderError::Io { .. }));
    assert_eq!(err.to_string(), "IO error (reading settings): disk");
}

#[test]
fn question_mark_uses_generated_from() {
    fn read() -> Result<(), LoaderError> {
        Err(std::io::Error::other("gone"))?;
        Ok(())
    }

    assert_eq!(read().unwrap_err().to_string(), "IO error: gone");
}

#[test]
fn strings_fall_back_to_internal() {
    let from_static: LoaderError = "boom".into();
    let from_owned: LoaderError = String::from("bang").into();

    assert_eq!(from_static.to_string(), "Internal error: boom");
    assert_eq!(from_owned.to_string(), "Internal error: bang");
}
