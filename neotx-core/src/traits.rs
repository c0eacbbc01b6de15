//! Core traits for turning Rust values into statement parameters.

use serde_json::Value;

/// Named bind values of a statement.
pub type Params = serde_json::Map<String, Value>;

/// Converts a Rust value into a JSON [`Value`] for use as a statement parameter.
///
/// A blanket implementation covers every type that already implements
/// `Into<serde_json::Value>` (`String`, `&str`, integers, floats, `bool`,
/// `Vec<T>`, `Option<T>`, maps and `Value` itself).
pub trait IntoParamValue {
    /// Convert `self` into a [`Value`].
    fn into_param_value(self) -> Value;
}

impl<T: Into<Value>> IntoParamValue for T {
    fn into_param_value(self) -> Value {
        self.into()
    }
}

/// Converts a struct into a parameter map for bulk binding.
///
/// Automatically implemented by `#[derive(ToParams)]`. Use with
/// [`Statement::params_from`](crate::Statement::params_from) to bind all
/// struct fields as named parameters in a single call.
///
/// # Example
///
/// ```rust,ignore
/// use neotx::prelude::*;
///
/// #[derive(ToParams)]
/// struct CreateUser {
///     name: String,
///     age: i64,
/// }
///
/// let params = CreateUser { name: "Alice".into(), age: 30 };
/// let statement = Statement::new("CREATE (u:User {name: {name}, age: {age}})")
///     .params_from(params);
/// ```
pub trait ToParams {
    /// Convert `self` into a map of parameter name to value.
    fn to_params(self) -> Params;
}

impl ToParams for Params {
    fn to_params(self) -> Params {
        self
    }
}
