use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, ExprLit, Fields, Lit, LitStr, Path};

struct FieldInfo {
    ident: syn::Ident,
    param_key: String,
    skip: bool,
}

fn parse_field(f: &syn::Field) -> syn::Result<FieldInfo> {
    let ident = f
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(f, "ToParams fields must be named"))?;
    let mut param_key = ident.to_string();
    let mut skip = false;

    for attr in &f.attrs {
        if attr.path().is_ident("neotx") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                } else if meta.path.is_ident("param") {
                    let value = meta.value()?;
                    let expr: Expr = value.parse()?;
                    match expr {
                        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => param_key = s.value(),
                        other => return Err(syn::Error::new_spanned(other, "expected a string literal")),
                    }
                } else {
                    return Err(meta.error("unknown neotx attribute, expected `skip` or `param = \"...\"`"));
                }
                Ok(())
            })?;
        }
    }

    Ok(FieldInfo { ident, param_key, skip })
}

/// Path of the crate that exports `traits`. Defaults to the `neotx`
/// facade; `#[neotx(crate = "neotx_core")]` points it at the core crate.
fn parse_crate_path(ast: &DeriveInput) -> syn::Result<Path> {
    let mut path: Path = syn::parse_quote!(neotx::core);
    for attr in &ast.attrs {
        if attr.path().is_ident("neotx") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    let lit: LitStr = meta.value()?.parse()?;
                    path = lit.parse()?;
                    Ok(())
                } else {
                    Err(meta.error("unknown neotx attribute, expected `crate = \"...\"`"))
                }
            })?;
        }
    }
    Ok(path)
}

pub fn expand(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let krate = match parse_crate_path(&ast) {
        Ok(path) => path,
        Err(e) => return e.to_compile_error().into(),
    };
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let fields = match &ast.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            _ => {
                return syn::Error::new_spanned(&ast, "ToParams only supports structs with named fields")
                    .to_compile_error()
                    .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&ast, "ToParams only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let mut inserts = Vec::new();

    for f in fields {
        let info = match parse_field(f) {
            Ok(info) => info,
            Err(e) => return e.to_compile_error().into(),
        };
        if info.skip {
            continue;
        }
        let ident = &info.ident;
        let key = &info.param_key;
        inserts.push(quote! {
            map.insert(#key.to_string(), #krate::traits::IntoParamValue::into_param_value(self.#ident));
        });
    }

    let expanded = quote! {
        impl #impl_generics #krate::traits::ToParams for #name #ty_generics #where_clause {
            fn to_params(self) -> #krate::traits::Params {
                let mut map = #krate::traits::Params::new();
                #(#inserts)*
                map
            }
        }
    };

    expanded.into()
}
