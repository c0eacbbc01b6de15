use proc_macro::TokenStream;
use quote::quote;

/// Collapse the spacing `TokenStream::to_string()` puts around punctuation,
/// so `( n : Person { props } )` reads `(n:Person {props})` again.
pub fn normalize(tokens: &str) -> String {
    let mut out = tokens.to_owned();
    for (from, to) in [
        (" ,", ","),
        (" :", ":"),
        (": ", ":"),
        ("( ", "("),
        (" )", ")"),
        ("[ ", "["),
        (" ]", "]"),
        ("{ ", "{"),
        (" }", "}"),
        ("$ ", "$"),
        (" .", "."),
        (". ", "."),
    ] {
        out = out.replace(from, to);
    }
    while out.contains("  ") {
        out = out.replace("  ", " ");
    }
    out.trim().to_owned()
}

pub fn expand(input: TokenStream) -> TokenStream {
    let text = normalize(&input.to_string());
    quote! { #text }.into()
}
