//! Derive macro implementation for automatic Fabricate trait derivation
//!
//! The macro enumerates a type's constructible shape at compile time:
//! struct fields become recursive factory resolutions, and enums select
//! their simplest variant (fewest fields, earliest declared).

use proc_macro2::TokenStream;
use syn::parse::Parser;
use syn::{
    Data, DeriveInput, Error, Field, Fields, GenericParam, Lit, Meta, MetaList, MetaNameValue,
    Result, Variant, parse_macro_input, parse_quote,
};
use quote::quote;

/// Main entry point for the Fabricate derive macro
pub fn derive_fabricate_impl(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_fabricate_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Generate the Fabricate implementation for the given input
fn generate_fabricate_impl(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    // Add bounds for Fabricate trait requirements
    let mut bounded_generics = input.generics.clone();
    add_trait_bounds(&mut bounded_generics);
    let (impl_generics, ty_generics, where_clause) = bounded_generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data_struct) => construct_fields(quote! { Self }, &data_struct.fields)?,
        Data::Enum(data_enum) => {
            let variants: Vec<&Variant> = data_enum.variants.iter().collect();
            let variant = select_variant(name, &variants)?;
            let variant_name = &variant.ident;
            construct_fields(quote! { Self::#variant_name }, &variant.fields)?
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                input,
                "Fabricate derive is not supported for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics objectory::Fabricate for #name #ty_generics #where_clause {
            fn fabricate(
                factory: &mut objectory::ObjectFactory,
            ) -> objectory::FactoryResult<Self> {
                Ok(#body)
            }
        }
    })
}

/// Add necessary trait bounds to generic parameters
fn add_trait_bounds(generics: &mut syn::Generics) {
    for param in &mut generics.params {
        if let GenericParam::Type(ref mut type_param) = *param {
            type_param.bounds.push(parse_quote!(objectory::Fabricate));
            type_param.bounds.push(parse_quote!('static));
        }
    }
}

/// Pick the simplest fabrication constructor among an enum's variants:
/// fewest fields, ties broken by declaration order
fn select_variant<'a>(name: &syn::Ident, variants: &[&'a Variant]) -> Result<&'a Variant> {
    variants
        .iter()
        .min_by_key(|variant| variant.fields.len())
        .copied()
        .ok_or_else(|| Error::new_spanned(name, "Cannot derive Fabricate for an enum with no variants"))
}

/// Generate a constructor expression for the given shape
fn construct_fields(path: TokenStream, fields: &Fields) -> Result<TokenStream> {
    match fields {
        Fields::Named(fields_named) => {
            let field_values = fields_named
                .named
                .iter()
                .map(|field| {
                    let field_name = field.ident.as_ref().unwrap();
                    let value = field_value(field)?;
                    Ok(quote! { #field_name: #value })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(quote! {
                #path {
                    #(#field_values,)*
                }
            })
        }
        Fields::Unnamed(fields_unnamed) => {
            let field_values = fields_unnamed
                .unnamed
                .iter()
                .map(field_value)
                .collect::<Result<Vec<_>>>()?;

            Ok(quote! {
                #path(
                    #(#field_values,)*
                )
            })
        }
        Fields::Unit => Ok(path),
    }
}

/// Generate the resolution expression for one field
fn field_value(field: &Field) -> Result<TokenStream> {
    // Look for #[fabricate(...)] attributes
    for attr in &field.attrs {
        if attr.path().is_ident("fabricate") {
            return parse_fabricate_attribute(attr);
        }
    }

    // Default: resolve through the full factory pipeline
    let field_type = &field.ty;
    Ok(quote! { factory.any::<#field_type>()? })
}

/// Parse a #[fabricate(...)] attribute
fn parse_fabricate_attribute(attr: &syn::Attribute) -> Result<TokenStream> {
    match &attr.meta {
        Meta::List(MetaList { tokens, .. }) => {
            let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
            let parsed = parser.parse2(tokens.clone())?;

            for meta in parsed {
                match meta {
                    Meta::NameValue(MetaNameValue { path, value, .. }) if path.is_ident("with") => {
                        let producer = parse_with_value(&value)?;
                        return Ok(quote! { #producer(factory)? });
                    }
                    other => {
                        return Err(Error::new_spanned(
                            other,
                            "Unsupported fabricate attribute; expected `with = path`",
                        ));
                    }
                }
            }
            Err(Error::new_spanned(attr, "Empty fabricate attribute"))
        }
        _ => Err(Error::new_spanned(attr, "Fabricate attribute must be a list")),
    }
}

/// Accept `with = some::path` or `with = "some::path"`
fn parse_with_value(value: &syn::Expr) -> Result<syn::Path> {
    match value {
        syn::Expr::Path(expr_path) => Ok(expr_path.path.clone()),
        syn::Expr::Lit(syn::ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) => syn::parse_str::<syn::Path>(&lit_str.value()),
        other => Err(Error::new_spanned(
            other,
            "The `with` value must be a function path",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_add_trait_bounds() {
        let mut generics: syn::Generics = parse_quote! { <T, U> };
        add_trait_bounds(&mut generics);

        if let GenericParam::Type(type_param) = &generics.params[0] {
            assert_eq!(type_param.bounds.len(), 2); // Fabricate, 'static
        }
    }

    #[test]
    fn test_select_variant_prefers_fewest_fields() {
        let name: syn::Ident = parse_quote! { Status };
        let unit: Variant = parse_quote! { Active };
        let tuple: Variant = parse_quote! { Inactive(String) };
        let named: Variant = parse_quote! { Pending { reason: String } };

        let variants = vec![&named, &tuple, &unit];
        let selected = select_variant(&name, &variants).unwrap();
        assert_eq!(selected.ident, "Active");
    }

    #[test]
    fn test_select_variant_breaks_ties_by_declaration_order() {
        let name: syn::Ident = parse_quote! { Either };
        let left: Variant = parse_quote! { Left(u8) };
        let right: Variant = parse_quote! { Right(u8) };

        let variants = vec![&left, &right];
        let selected = select_variant(&name, &variants).unwrap();
        assert_eq!(selected.ident, "Left");
    }

    #[test]
    fn test_select_variant_rejects_empty_enum() {
        let name: syn::Ident = parse_quote! { Never };
        assert!(select_variant(&name, &[]).is_err());
    }

    #[test]
    fn test_construct_unit_shape() {
        let body = construct_fields(quote! { Self }, &Fields::Unit).unwrap();
        assert_eq!(body.to_string(), quote! { Self }.to_string());
    }

    #[test]
    fn test_parse_with_value_accepts_path_and_string() {
        let bare: syn::Expr = parse_quote! { my_mod::producer };
        assert!(parse_with_value(&bare).is_ok());

        let quoted: syn::Expr = parse_quote! { "my_mod::producer" };
        assert!(parse_with_value(&quoted).is_ok());

        let bad: syn::Expr = parse_quote! { 42 };
        assert!(parse_with_value(&bad).is_err());
    }
}
