use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

pub fn derive_doctype(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let ident = &input.ident;

    // #[doctype(name = "...")] on the struct, defaults to the struct name
    let doctype = extract_doctype(&input);

    let name_field = match extract_name_field(&input) {
        Ok(field) => field,
        Err(err) => return err.to_compile_error().into(),
    };

    let expanded = quote! {
        impl next_crm::Document for #ident {
            const DOCTYPE: &'static str = #doctype;

            fn name(&self) -> &str {
                &self.#name_field
            }
        }
    };

    TokenStream::from(expanded)
}

fn extract_doctype(input: &DeriveInput) -> String {
    for attr in &input.attrs {
        if !attr.path().is_ident("doctype") {
            continue;
        }

        let mut doctype = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                doctype = Some(value.value());
            }
            Ok(())
        });

        if let Some(d) = doctype {
            return d;
        }
    }

    input.ident.to_string()
}

fn extract_name_field(input: &DeriveInput) -> syn::Result<Ident> {
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Doctype derive only supports structs",
        ));
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Doctype derive requires named fields",
        ));
    };

    fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == "name")
        .cloned()
        .ok_or_else(|| {
            syn::Error::new_spanned(&input.ident, "Doctype derive requires a `name` field")
        })
}
