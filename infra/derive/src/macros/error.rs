use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Ident, Type, Variant};

const VEIL_ATTR: &str = "veil";

struct VariantMeta {
    ident: Ident,
    source_ty: Option<Type>,
    source_field: Option<Ident>,
    has_context: bool,
    opaque: bool,
    cfg_attrs: Vec<Attribute>,
}

pub fn expand_derive(mut input: DeriveInput) -> TokenStream {
    let name = input.ident.clone();
    let trait_name = format_ident!("{}Ext", name);

    let Data::Enum(data) = &mut input.data else {
        return quote! { compile_error!("veil_error can only be applied to enums"); };
    };

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &mut data.variants {
        match parse_variant(variant) {
            Ok(meta) => variants.push(meta),
            Err(err) => return err,
        }
    }
    if let Some(err) = variants_error(&variants) {
        return err;
    }

    let derived_traits = derived_trait_names(&input);
    let mut derive_tokens = Vec::new();
    if !derived_traits.contains("Debug") {
        derive_tokens.push(quote! { Debug });
    }
    if !derived_traits.contains("Error") {
        derive_tokens.push(quote! { ::thiserror::Error });
    }
    let extra_derives = if derive_tokens.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#derive_tokens),*)] }
    };

    let context_impl = generate_context_trait(&name, &trait_name, &variants);
    let from_impls = variants.iter().filter_map(|v| generate_from_impl(&name, &trait_name, v));
    let internal_impls = generate_internal_impls(&name, &variants);
    let classify_impl = generate_classify_impl(&name, &variants);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #extra_derives
        #input

        #context_impl
        #(#from_impls)*
        #internal_impls
        #classify_impl

        #[allow(dead_code)]
        fn format_context(
            context: &Option<std::borrow::Cow<'static, str>>,
        ) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| {
                std::borrow::Cow::Owned(format!(" ({c})"))
            })
        }
    }
}

/// Collects variant metadata and strips the `#[veil(...)]` markers.
fn parse_variant(v: &mut Variant) -> Result<VariantMeta, TokenStream> {
    let opaque = take_veil_flags(v)?;

    let Fields::Named(fields) = &v.fields else {
        return Err(syn::Error::new_spanned(
            &*v,
            "veil_error requires named fields for source/context handling",
        )
        .to_compile_error());
    };

    let context_field = find_context_field(fields)?;
    let source_field = find_source_field(fields);
    let cfg_attrs = v.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect();

    Ok(VariantMeta {
        ident: v.ident.clone(),
        source_ty: source_field.map(|field| field.ty.clone()),
        source_field: source_field.and_then(|field| field.ident.clone()),
        has_context: context_field.is_some(),
        opaque,
        cfg_attrs,
    })
}

fn take_veil_flags(v: &mut Variant) -> Result<bool, TokenStream> {
    let mut opaque = false;
    let mut error = None;

    v.attrs.retain(|attr| {
        if !attr.path().is_ident(VEIL_ATTR) {
            return true;
        }
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("opaque") {
                opaque = true;
                Ok(())
            } else {
                Err(meta.error("unsupported veil flag, expected `opaque`"))
            }
        });
        if let Err(e) = parsed {
            error = Some(e.to_compile_error());
        }
        false
    });

    error.map_or(Ok(opaque), Err)
}

fn find_context_field(fields: &syn::FieldsNamed) -> Result<Option<&syn::Field>, TokenStream> {
    for field in &fields.named {
        let Some(ident) = &field.ident else { continue };
        if ident != "context" {
            continue;
        }
        if !is_context_type(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "context field must be Option<Cow<'static, str>>",
            )
            .to_compile_error());
        }
        return Ok(Some(field));
    }

    Ok(None)
}

fn find_source_field(fields: &syn::FieldsNamed) -> Option<&syn::Field> {
    fields.named.iter().find(|field| {
        let is_source_name = field.ident.as_ref().is_some_and(|ident| ident == "source");
        is_source_name || field_has_attr(field, "source") || field_has_attr(field, "from")
    })
}

fn generate_context_trait(
    name: &Ident,
    trait_name: &Ident,
    variants: &[VariantMeta],
) -> TokenStream {
    let context_variants = variants.iter().filter(|v| v.has_context).map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = &v.ident;
        quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
    });

    quote! {
        pub trait #trait_name<T> {
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #trait_name<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut e| {
                    match &mut e {
                        #( #context_variants )*
                        _ => {}
                    }
                    e
                })
            }
        }
    }
}

fn generate_from_impl(name: &Ident, trait_name: &Ident, v: &VariantMeta) -> Option<TokenStream> {
    if v.ident == "Internal" {
        return None;
    }
    let source_ty = v.source_ty.as_ref()?;
    let source_field = v.source_field.as_ref()?;
    let v_ident = &v.ident;
    let cfg_attrs = &v.cfg_attrs;

    Some(quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl From<#source_ty> for #name {
            #[inline]
            fn from(#source_field: #source_ty) -> Self {
                Self::#v_ident { #source_field, context: None }
            }
        }

        #(#cfg_attrs)*
        impl<T> #trait_name<T> for std::result::Result<T, #source_ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> std::result::Result<T, #name> {
                self.map_err(|#source_field| #name::#v_ident {
                    #source_field,
                    context: Some(context.into()),
                })
            }
        }
    })
}

fn generate_internal_impls(name: &Ident, variants: &[VariantMeta]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.ident == "Internal") else {
        return quote!();
    };
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None }
            }
        }
        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(s), context: None }
            }
        }
    }
}

fn generate_classify_impl(name: &Ident, variants: &[VariantMeta]) -> TokenStream {
    let kind_arms = variants.iter().map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = &v.ident;
        let kind = to_snake_case(&ident.to_string());
        quote! { #(#cfg_attrs)* Self::#ident { .. } => #kind, }
    });

    let opaque_arms = variants.iter().filter(|v| v.opaque).map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = &v.ident;
        quote! { #(#cfg_attrs)* Self::#ident { .. } => true, }
    });

    quote! {
        #[automatically_derived]
        impl #name {
            /// Stable `snake_case` name of the variant, safe to log.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                match self {
                    #( #kind_arms )*
                }
            }

            /// `true` for variants that must not be distinguished on attacker-facing channels.
            #[must_use]
            #[allow(
                clippy::match_like_matches_macro,
                clippy::match_single_binding,
                unreachable_patterns
            )]
            pub const fn is_opaque(&self) -> bool {
                match self {
                    #( #opaque_arms )*
                    _ => false,
                }
            }
        }
    }
}

fn to_snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn field_has_attr(field: &syn::Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn derived_trait_names(input: &DeriveInput) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("derive") {
            continue;
        }

        let _ = attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.segments.last().map(|seg| seg.ident.to_string()) {
                traits.insert(ident);
            }
            Ok(())
        });
    }

    traits
}

fn variants_error(variants: &[VariantMeta]) -> Option<TokenStream> {
    variants.iter().find(|v| v.source_ty.is_some() && !v.has_context).map(|v| {
        syn::Error::new_spanned(
            &v.ident,
            "veil_error requires `context: Option<Cow<'static, str>>` for variants with a source",
        )
        .to_compile_error()
    })
}

fn is_context_type(ty: &Type) -> bool {
    let Some(inner) = single_generic(ty, "Option") else {
        return false;
    };
    let Type::Path(inner_path) = inner else {
        return false;
    };
    let Some(inner_seg) = inner_path.path.segments.last() else {
        return false;
    };
    if inner_seg.ident != "Cow" {
        return false;
    }
    let syn::PathArguments::AngleBracketed(inner_args) = &inner_seg.arguments else {
        return false;
    };
    let mut args_iter = inner_args.args.iter();
    let Some(syn::GenericArgument::Lifetime(lt)) = args_iter.next() else {
        return false;
    };
    if lt.ident != "static" {
        return false;
    }
    let Some(syn::GenericArgument::Type(Type::Path(str_path))) = args_iter.next() else {
        return false;
    };
    str_path.path.segments.last().is_some_and(|seg| seg.ident == "str")
}

/// Returns `T` for a path type shaped like `wrapper<T>`.
fn single_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_splits_on_capitals() {
        assert_eq!(to_snake_case("DecryptionFailed"), "decryption_failed");
        assert_eq!(to_snake_case("Internal"), "internal");
        assert_eq!(to_snake_case("EngineUnavailable"), "engine_unavailable");
    }

    #[test]
    fn opaque_flag_is_stripped_from_variant() {
        let mut variant: Variant = syn::parse_quote! {
            #[veil(opaque)]
            #[error("rejected")]
            Rejected { message: std::borrow::Cow<'static, str> }
        };
        let opaque = take_veil_flags(&mut variant).unwrap_or(false);
        assert!(opaque);
        assert_eq!(variant.attrs.len(), 1);
        assert!(variant.attrs[0].path().is_ident("error"));
    }

    fn expands_to_compile_error(input: DeriveInput) -> bool {
        expand_derive(input).to_string().contains("compile_error")
    }

    #[test]
    fn rejects_source_without_context() {
        let input: DeriveInput = syn::parse_quote! {
            pub enum DemoError {
                #[error("IO error: {source}")]
                Io { #[source] source: std::io::Error },
            }
        };
        assert!(expands_to_compile_error(input));
    }

    #[test]
    fn rejects_tuple_variants() {
        let input: DeriveInput = syn::parse_quote! {
            pub enum DemoError {
                #[error("IO error: {0}")]
                Io(std::io::Error),
            }
        };
        assert!(expands_to_compile_error(input));
    }

    #[test]
    fn rejects_badly_typed_context() {
        let input: DeriveInput = syn::parse_quote! {
            pub enum DemoError {
                #[error("bad")]
                Bad { message: String, context: Option<String> },
            }
        };
        assert!(expands_to_compile_error(input));
    }

    #[test]
    fn rejects_unknown_veil_flag() {
        let input: DeriveInput = syn::parse_quote! {
            pub enum DemoError {
                #[veil(secret)]
                #[error("bad")]
                Bad { message: String },
            }
        };
        assert!(expands_to_compile_error(input));
    }

    #[test]
    fn rejects_structs() {
        let input: DeriveInput = syn::parse_quote! {
            pub struct NotAnEnum { message: String }
        };
        assert!(expands_to_compile_error(input));
    }

    #[test]
    fn context_type_detection() {
        let good: Type = syn::parse_quote!(Option<Cow<'static, str>>);
        let bad: Type = syn::parse_quote!(Option<String>);
        assert!(is_context_type(&good));
        assert!(!is_context_type(&bad));
    }
}
