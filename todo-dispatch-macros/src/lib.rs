//! Procedural macros for todo-dispatch

use darling::{FromDeriveInput, FromField, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Also implement `ActionSummary` with its default (Debug-based) summary
    #[darling(default)]
    summary: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit name override
    #[darling(default)]
    name: Option<String>,
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant name as a static
/// string. `#[action(name = "...")]` on a variant overrides it.
///
/// With `#[action(summary)]`, also implements `ActionSummary` using its
/// default summary.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(summary)]
/// enum TodoAction {
///     AddTodo { id: u64, text: String },
///     ToggleTodo { id: u64 },
///     #[action(name = "Unknown")]
///     Unrecognized,
/// }
///
/// assert_eq!(TodoAction::ToggleTodo { id: 1 }.name(), "ToggleTodo");
/// assert_eq!(TodoAction::Unrecognized.name(), "Unknown");
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let variant_str = v.name.clone().unwrap_or_else(|| variant_name.to_string());

        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #variant_str
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #variant_str
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #variant_str
            },
        }
    });

    // An empty enum has no values, so `name` can never be called
    let body = if variants.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#name_arms),*
            }
        }
    };

    let mut expanded = quote! {
        impl #impl_generics todo_dispatch::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                #body
            }
        }
    };

    if opts.summary {
        expanded.extend(quote! {
            impl #impl_generics todo_dispatch::ActionSummary for #name #ty_generics #where_clause {}
        });
    }

    expanded.into()
}

/// Container-level attributes for #[derive(CombinedReducer)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(reducer), supports(struct_named))]
struct ReducerOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<(), ReducerField>,

    /// Action type every field reducer accepts
    action: syn::Path,
}

/// Field-level attributes
#[derive(Debug, FromField)]
#[darling(attributes(reducer))]
struct ReducerField {
    ident: Option<syn::Ident>,

    /// Slice reducer for this field, `fn(&Field, &Action) -> Field`
    #[darling(default)]
    with: Option<syn::Path>,

    /// Carry the field over unchanged (cloned) on every action
    #[darling(default)]
    skip: bool,
}

/// Derive macro for the CombinedReducer trait
///
/// Every named field declares the slice reducer that owns it. The generated
/// `reduce` calls each field reducer with that field's current value and
/// the action, and builds the next state from the results.
///
/// # Attributes
///
/// - `#[reducer(action = "Path")]` on the struct: the action type
/// - `#[reducer(with = "path")]` on a field: its slice reducer
/// - `#[reducer(skip)]` on a field: clone it through unchanged
///
/// # Example
/// ```ignore
/// #[derive(Clone, Debug, Default, PartialEq, CombinedReducer)]
/// #[reducer(action = "TodoAction")]
/// struct AppState {
///     #[reducer(with = "reduce_todos")]
///     todos: TodoList,
///     #[reducer(with = "reduce_visibility_filter")]
///     visibility_filter: VisibilityFilter,
/// }
/// ```
#[proc_macro_derive(CombinedReducer, attributes(reducer))]
pub fn derive_combined_reducer(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ReducerOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let action = &opts.action;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let fields = match &opts.data {
        darling::ast::Data::Struct(fields) => fields,
        _ => {
            return syn::Error::new_spanned(
                &input,
                "CombinedReducer can only be derived for structs with named fields",
            )
            .to_compile_error()
            .into();
        }
    };

    let mut errors = darling::Error::accumulator();
    let mut inits = Vec::new();

    for field in fields.iter() {
        let Some(ident) = &field.ident else {
            continue;
        };

        match (&field.with, field.skip) {
            (Some(with), false) => inits.push(quote! {
                #ident: #with(&state.#ident, action)
            }),
            (None, true) => inits.push(quote! {
                #ident: ::core::clone::Clone::clone(&state.#ident)
            }),
            (Some(_), true) => errors.push(
                darling::Error::custom("`with` and `skip` cannot be combined").with_span(ident),
            ),
            (None, false) => errors.push(
                darling::Error::custom(format!(
                    "field `{}` needs #[reducer(with = \"...\")] or #[reducer(skip)]",
                    ident
                ))
                .with_span(ident),
            ),
        }
    }

    if let Err(e) = errors.finish() {
        return e.write_errors().into();
    }

    let expanded = quote! {
        impl #impl_generics todo_dispatch::CombinedReducer<#action> for #name #ty_generics #where_clause {
            fn reduce(state: &Self, action: &#action) -> Self {
                Self {
                    #(#inits),*
                }
            }
        }
    };

    expanded.into()
}
