use std::borrow::Cow;
use veil_derive::veil_error;

#[veil_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk gone")).context("Reading key file")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.kind(), "io");
    assert!(!err.is_opaque());
    assert!(err.to_string().contains("(Reading key file)"));

    let internal: DemoError = "boom".into();
    assert_eq!(internal.kind(), "internal");
}
