use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Derive macro implementing `dui::view::View` for a struct that owns a `ViewBase`.
///
/// The field holding the `ViewBase` is either marked with `#[view]` or named `base`.
///
/// # Example
/// ```ignore
/// #[derive(View)]
/// pub struct Badge {
///     base: ViewBase,
///     count: u32,
/// }
///
/// // Modifiers come for free through the blanket impl
/// let badge = Badge::new(3).width(24).height(24);
/// ```
#[proc_macro_derive(View, attributes(view))]
pub fn derive_view(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input.ident,
                    "View can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input.ident, "View can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    // An explicit #[view] marker wins over the `base` naming convention
    let marked = fields
        .iter()
        .find(|field| field.attrs.iter().any(|attr| attr.path().is_ident("view")));
    let base_field = marked.or_else(|| {
        fields
            .iter()
            .find(|field| field.ident.as_ref().is_some_and(|ident| ident == "base"))
    });

    let Some(base_field) = base_field else {
        return syn::Error::new_spanned(
            &input.ident,
            "View derive needs a `base: ViewBase` field or a field marked #[view]",
        )
        .to_compile_error()
        .into();
    };
    let base_ident = &base_field.ident;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::dui::view::View for #name #ty_generics #where_clause {
            fn base(&self) -> &::dui::view::ViewBase {
                &self.#base_ident
            }

            fn base_mut(&mut self) -> &mut ::dui::view::ViewBase {
                &mut self.#base_ident
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };

    TokenStream::from(expanded)
}
