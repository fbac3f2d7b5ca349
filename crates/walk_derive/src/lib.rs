use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, Type};

/// Derives `crate::walk::Walk` for a type-graph node.
///
/// Fields are dispatched on their declared type:
///
/// - `Ty` goes to `Visitor::visit_ty`
/// - `ObjId` goes to `Visitor::visit_object`
/// - `bool` and integer fields are leaves
/// - anything else must implement `Walk` itself
///
/// Other leaf fields (symbols, flags, enums without handles) are marked
/// `#[walk(skip)]`.
#[proc_macro_derive(WalkTypes, attributes(walk))]
pub fn derive_walk_types(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let body = match &input.data {
        Data::Struct(s) => struct_body(&s.fields)?,
        Data::Enum(e) => {
            let mut arms = Vec::with_capacity(e.variants.len());
            for variant in &e.variants {
                let ident = &variant.ident;
                let (pattern, calls) = bind_fields(&variant.fields)?;
                arms.push(quote! { Self::#ident #pattern => { #(#calls)* } });
            }
            quote! {
                match self {
                    #(#arms)*
                }
            }
        }
        Data::Union(u) => {
            return Err(syn::Error::new_spanned(
                u.union_token,
                "WalkTypes cannot be derived for unions",
            ))
        }
    };

    Ok(quote! {
        impl<'p> crate::walk::Walk<'p> for #name {
            #[inline]
            #[allow(unused_variables)]
            fn walk<V: crate::walk::Visitor<'p> + ?Sized>(
                &self,
                p: &'p crate::package::Package,
                v: &mut V,
            ) {
                #body
            }
        }
    })
}

/// How a single field takes part in the walk.
enum Role {
    Ty,
    Object,
    Nested,
    Leaf,
}

fn role(field: &Field) -> syn::Result<Role> {
    let mut skip = false;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("walk")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `skip`"))
            }
        })?;
    }
    if skip {
        return Ok(Role::Leaf);
    }

    let Type::Path(path) = &field.ty else {
        return Ok(Role::Nested);
    };
    let Some(last) = path.path.segments.last() else {
        return Ok(Role::Nested);
    };
    let role = match last.ident.to_string().as_str() {
        "Ty" => Role::Ty,
        "ObjId" => Role::Object,
        "bool" | "u8" | "u16" | "u32" | "u64" | "usize" | "i8" | "i16" | "i32" | "i64"
        | "isize" => Role::Leaf,
        _ => Role::Nested,
    };
    Ok(role)
}

/// The visit for a field reachable through the reference `access`.
fn visit(role: &Role, access: TokenStream2) -> Option<TokenStream2> {
    match role {
        Role::Ty => Some(quote! { v.visit_ty(p, *#access); }),
        Role::Object => Some(quote! { v.visit_object(p, *#access); }),
        Role::Nested => Some(quote! { crate::walk::Walk::walk(#access, p, v); }),
        Role::Leaf => None,
    }
}

fn struct_body(fields: &Fields) -> syn::Result<TokenStream2> {
    let mut calls = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let access = match &field.ident {
            Some(ident) => quote! { &self.#ident },
            None => {
                let index = syn::Index::from(i);
                quote! { &self.#index }
            }
        };
        calls.extend(visit(&role(field)?, access));
    }
    Ok(quote! { #(#calls)* })
}

/// A match pattern binding only the walked fields, and their visits.
fn bind_fields(fields: &Fields) -> syn::Result<(TokenStream2, Vec<TokenStream2>)> {
    let mut calls = Vec::new();
    let pattern = match fields {
        Fields::Unit => TokenStream2::new(),
        Fields::Named(named) => {
            let mut bound = Vec::new();
            for field in &named.named {
                let Some(ident) = &field.ident else {
                    continue;
                };
                if let Some(call) = visit(&role(field)?, quote! { #ident }) {
                    calls.push(call);
                    bound.push(ident);
                }
            }
            quote! { { #(#bound,)* .. } }
        }
        Fields::Unnamed(unnamed) => {
            let mut slots = Vec::new();
            for (i, field) in unnamed.unnamed.iter().enumerate() {
                let role = role(field)?;
                let binding = format_ident!("f{}", i);
                match visit(&role, quote! { #binding }) {
                    Some(call) => {
                        calls.push(call);
                        slots.push(quote! { #binding });
                    }
                    None => slots.push(quote! { _ }),
                }
            }
            quote! { ( #(#slots),* ) }
        }
    };
    Ok((pattern, calls))
}
