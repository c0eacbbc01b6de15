//! Procedural macros for neotx.
//!
//! This crate is not meant to be used directly; use the [`neotx`] facade
//! crate which re-exports all macros.

extern crate proc_macro;

use proc_macro::TokenStream;

mod cypher;
mod cypher_query;
mod to_params;

/// Converts a Cypher token block into a `&'static str` with normalized whitespace.
///
/// The output is literal; it is never rewritten or validated.
///
/// # Example
///
/// ```rust,ignore
/// use neotx::prelude::*;
///
/// let q: &str = cypher! {
///     START node = node({id})
///     OPTIONAL MATCH (node) -[relationships]- ()
///     RETURN relationships
/// };
/// ```
#[proc_macro]
pub fn cypher(input: TokenStream) -> TokenStream {
    cypher::expand(input)
}

/// Builds a [`Query`](neotx::query::Query) from a Cypher block with auto-bound parameters.
///
/// Every `$ident` and every legacy `{ident}` placeholder becomes a named
/// parameter. The Rust variable `ident` must be in scope and implement
/// `IntoParamValue`. Duplicate parameters are bound only once.
///
/// # Example
///
/// ```rust,ignore
/// use neotx::prelude::*;
///
/// let props = serde_json::json!({"name": "Neo"});
/// let min_age = 30;
/// let query = cypher_query! {
///     CREATE (n {props}) WITH n WHERE n.age > $min_age RETURN n
/// };
/// // Expands to:
/// //   Query::new("CREATE (n {props}) WITH n WHERE n.age > $min_age RETURN n")
/// //       .param("props", props)
/// //       .param("min_age", min_age)
/// ```
#[proc_macro]
pub fn cypher_query(input: TokenStream) -> TokenStream {
    cypher_query::expand(input)
}

/// Derive `ToParams` for a struct.
///
/// Converts each field into a named statement parameter via `IntoParamValue`.
/// Use with `Statement::params_from` for bulk parameter binding.
///
/// # Attributes
///
/// **Container-level:**
/// - `#[neotx(crate = "...")]` sets the path the generated impl uses to reach
///   `traits::ToParams` (default: `neotx::core`). Crates that depend on
///   `neotx-core` without the `neotx` facade write
///   `#[neotx(crate = "neotx_core")]`.
///
/// **Field-level:**
/// - `#[neotx(skip)]` excludes the field from the parameter map.
/// - `#[neotx(param = "...")]` overrides the parameter name (default: field name).
///
/// # Example
///
/// ```rust,ignore
/// use neotx::prelude::*;
///
/// #[derive(ToParams)]
/// struct SetAge {
///     #[neotx(skip)]
///     cache_key: u64,
///     id: u64,
///     #[neotx(param = "value")]
///     age: i64,
/// }
/// ```
#[proc_macro_derive(ToParams, attributes(neotx))]
pub fn to_params(input: TokenStream) -> TokenStream {
    to_params::expand(input)
}
