use std::borrow::Cow;
use veil_derive::veil_error;

#[veil_error]
pub enum GateError {
    #[veil(opaque)]
    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[veil(opaque)]
    #[error("Unknown format{}: {message}", format_context(.context))]
    UnknownFormat { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Expired at {expires_at}")]
    Expired { expires_at: i64 },
}

fn main() {
    let rejected = GateError::Rejected { message: "bad tag".into(), context: None };
    let unknown = GateError::UnknownFormat { message: "bad marker".into(), context: None };
    let expired = GateError::Expired { expires_at: 10 };

    assert!(rejected.is_opaque());
    assert!(unknown.is_opaque());
    assert!(!expired.is_opaque());
    assert_eq!(unknown.kind(), "unknown_format");

    let with_ctx: Result<(), GateError> = Err(rejected);
    let err = with_ctx.context("Opening frame").unwrap_err();
    assert_eq!(err.to_string(), "Rejected (Opening frame): bad tag");
}
