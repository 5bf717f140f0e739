mod identified;

use proc_macro::TokenStream;

/// Derive macro implementing `context_store::Identified`.
///
/// # Usage
///
/// ```ignore
/// use context_store::Identified;
///
/// #[derive(Clone, PartialEq, Identified)]
/// struct Panel {
///     id: String,
///     title: String,
/// }
///
/// #[derive(Clone, PartialEq, Identified)]
/// struct Trade {
///     #[identified(id)]
///     trade_ref: u64,
///     qty: u32,
/// }
/// ```
///
/// - `#[identified(id)]` marks the field holding the identity.
///   If omitted, defaults to a field named `id`.
/// - The identity type is the type of that field.
#[proc_macro_derive(Identified, attributes(identified))]
pub fn derive_identified(input: TokenStream) -> TokenStream {
    identified::derive_identified(input)
}
