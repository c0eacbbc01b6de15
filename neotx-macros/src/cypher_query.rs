//! Implementation of the `cypher_query!` proc macro.
//!
//! Scans a Cypher token stream for parameters, normalizes whitespace (same
//! rules as `cypher!`) and generates
//! `neotx::query::Query::new("...").param(...)...` with every discovered
//! parameter bound to the Rust variable of the same name.

use proc_macro::TokenStream;
use proc_macro2::{Delimiter, TokenTree};
use quote::quote;
use std::collections::HashSet;

use crate::cypher::normalize;

fn bind(ident: &proc_macro2::Ident, params: &mut Vec<proc_macro2::Ident>, seen: &mut HashSet<String>) {
    if seen.insert(ident.to_string()) {
        params.push(ident.clone());
    }
}

/// Recursively collect parameters, deduplicated by name.
///
/// Two spellings are recognized: `$ident` and the legacy `{ident}` (a brace
/// group holding nothing but one identifier). A brace group with anything
/// else in it, such as the map literal `{name: 'Neo'}`, is scanned as usual.
fn scan_params(stream: proc_macro2::TokenStream, params: &mut Vec<proc_macro2::Ident>, seen: &mut HashSet<String>) {
    let tokens: Vec<TokenTree> = stream.into_iter().collect();
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            TokenTree::Punct(p) if p.as_char() == '$' => {
                if let Some(TokenTree::Ident(ident)) = tokens.get(i + 1) {
                    bind(ident, params, seen);
                    i += 2;
                    continue;
                }
                i += 1;
            }
            TokenTree::Group(g) => {
                let inner: Vec<TokenTree> = g.stream().into_iter().collect();
                match (g.delimiter(), inner.as_slice()) {
                    (Delimiter::Brace, [TokenTree::Ident(ident)]) => bind(ident, params, seen),
                    _ => scan_params(g.stream(), params, seen),
                }
                i += 1;
            }
            _ => {
                i += 1;
            }
        }
    }
}

pub fn expand(input: TokenStream) -> TokenStream {
    let input2: proc_macro2::TokenStream = input.into();
    let text = normalize(&input2.to_string());

    let mut params: Vec<proc_macro2::Ident> = Vec::new();
    let mut seen = HashSet::new();
    scan_params(input2, &mut params, &mut seen);

    let param_calls = params.iter().map(|ident| {
        let name = ident.to_string();
        quote! { .param(#name, #ident) }
    });

    quote! {
        neotx::query::Query::new(#text) #(#param_calls)*
    }
    .into()
}
