use veil_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn second_init_keeps_first_logger() {
    let first = Logger::builder()
        .name("veil-primary")
        .ansi(false)
        .init()
        .expect("first init");

    let err = Logger::builder()
        .name("veil-secondary")
        .level(LevelFilter::TRACE)
        .init()
        .unwrap_err();

    assert!(matches!(err, LoggerError::Subscriber { .. }));
    assert_eq!(err.kind(), "subscriber");
    assert!(!err.is_opaque());
    assert!(err.to_string().contains("Global subscriber already set"), "{err}");

    assert_eq!(first.name(), "veil-primary");
}
