mod doctype;

use proc_macro::TokenStream;

/// Derive macro for the `Document` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Doctype)]
/// #[doctype(name = "CRM Contacts")]
/// struct OpportunityContact {
///     pub name: String,
///     pub parent: String,
///     pub contact: String,
/// }
/// ```
///
/// - `#[doctype(name = "...")]` sets the doctype the record is stored under.
///   If omitted, defaults to the struct name.
/// - The record identifier is the struct's `name` field.
#[proc_macro_derive(Doctype, attributes(doctype))]
pub fn derive_doctype(input: TokenStream) -> TokenStream {
    doctype::derive_doctype(input)
}
