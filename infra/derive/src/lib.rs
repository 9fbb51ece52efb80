#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the `veil` crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! veil-derive = { path = "../infra/derive" }
//! thiserror = "2"
//! ```
//!
//! Examples are `ignore`d to avoid compiling in this crate; the UI tests under
//! `tests/ui` exercise the macro against real consumers.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring typed error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source error.
/// * **Standard Conversions**: Implements `From<Source>` for variants with a `source`
///   field (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
/// * **Classification**: `kind()` returns the variant name in `snake_case`, and
///   `is_opaque()` reports variants tagged `#[veil(opaque)]`. Opaque variants are the
///   ones that must look identical on an attacker-facing channel.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants carrying a source must also carry `context: Option<Cow<'static, str>>`.
/// 3. Tuple and unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
/// use veil_derive::veil_error;
///
/// #[veil_error]
/// pub enum CodecError {
///     #[error("Malformed input{}: {message}", format_context(.context))]
///     Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[veil(opaque)]
///     #[error("Authentication failed{}: {message}", format_context(.context))]
///     Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Hex error{}: {source}", format_context(.context))]
///     Hex { source: hex::FromHexError, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(text: &str) -> Result<Vec<u8>, CodecError> {
///     hex::decode(text).context("Decoding compact payload")
/// }
/// ```
#[proc_macro_attribute]
pub fn veil_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
