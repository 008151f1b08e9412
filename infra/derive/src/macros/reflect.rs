use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Field, Fields, LitStr};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Access {
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

struct FieldOptions {
    skip: bool,
    access: Access,
    rename: Option<LitStr>,
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "Reflect only supports structs"));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Reflect only supports structs with named fields",
        ));
    };

    let mut properties = Vec::new();
    for field in &fields.named {
        let options = field_options(&field.attrs)?;
        if options.skip {
            continue;
        }
        properties.push(property_tokens(field, &options)?);
    }

    let constructor = if struct_requests_constructor(&input.attrs)? {
        quote! { .constructor(::sqlmap_reflection::Constructor::of_default::<Self>()) }
    } else {
        quote! {}
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::sqlmap_reflection::Reflect for #name #ty_generics #where_clause {
            fn class_shape() -> ::sqlmap_reflection::ClassShape {
                ::sqlmap_reflection::ClassShape::of::<Self>()
                    #( .property(#properties) )*
                    #constructor
            }
        }
    })
}

fn property_tokens(field: &Field, options: &FieldOptions) -> Result<TokenStream, syn::Error> {
    let Some(ident) = &field.ident else {
        return Err(syn::Error::new_spanned(field, "Reflect only supports named fields"));
    };
    let ty = &field.ty;
    let property = options.rename.as_ref().map_or_else(
        || LitStr::new(ident.to_string().trim_start_matches("r#"), ident.span()),
        Clone::clone,
    );

    Ok(match options.access {
        Access::ReadWrite => quote! {
            ::sqlmap_reflection::PropertyDecl::read_write::<Self, #ty>(#property, |o| &o.#ident, |o| &mut o.#ident)
        },
        Access::ReadOnly => quote! {
            ::sqlmap_reflection::PropertyDecl::read_only::<Self, #ty>(#property, |o| &o.#ident)
        },
        Access::WriteOnly => quote! {
            ::sqlmap_reflection::PropertyDecl::write_only::<Self, #ty>(#property, |o| &mut o.#ident)
        },
    })
}

fn field_options(attrs: &[Attribute]) -> Result<FieldOptions, syn::Error> {
    let mut options = FieldOptions { skip: false, access: Access::ReadWrite, rename: None };

    for attr in attrs.iter().filter(|a| a.path().is_ident("reflect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("read_only") {
                options.access = exclusive_access(options.access, Access::ReadOnly, &meta)?;
            } else if meta.path.is_ident("write_only") {
                options.access = exclusive_access(options.access, Access::WriteOnly, &meta)?;
            } else if meta.path.is_ident("rename") {
                if options.rename.is_some() {
                    return Err(meta.error("Duplicate `rename = \"...\"` argument"));
                }
                options.rename = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error(
                    "Expected one of `skip`, `read_only`, `write_only`, `rename = \"...\"`",
                ));
            }
            Ok(())
        })?;
    }

    Ok(options)
}

fn exclusive_access(
    current: Access,
    requested: Access,
    meta: &syn::meta::ParseNestedMeta<'_>,
) -> Result<Access, syn::Error> {
    if current == Access::ReadWrite || current == requested {
        Ok(requested)
    } else {
        Err(meta.error("`read_only` and `write_only` are mutually exclusive"))
    }
}

fn struct_requests_constructor(attrs: &[Attribute]) -> Result<bool, syn::Error> {
    let mut requested = false;

    for attr in attrs.iter().filter(|a| a.path().is_ident("reflect")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default_constructor") {
                requested = true;
                Ok(())
            } else {
                Err(meta.error("Only `default_constructor` is supported on the struct"))
            }
        })?;
    }

    Ok(requested)
}
