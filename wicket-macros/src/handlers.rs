//! The `#[event_handlers]` attribute.
//!
//! Turns an inherent `impl` block into an `EventHandlers` set. A method becomes
//! a route when it is named `event_<snake_case>` (selector `event<PascalCase>`)
//! or carries `#[on("Type/Name")]` (selector `eventTypeName`). Other methods are
//! left alone.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use std::collections::HashMap;
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr, parse_macro_input, spanned::Spanned};

const PREFIX: &str = "event";

struct Route {
    selector: String,
    method: syn::Ident,
}

/// Implementation of the `#[event_handlers]` macro.
pub fn event_handlers_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            Span::call_site(),
            "#[event_handlers] does not take arguments",
        )
        .to_compile_error()
        .into();
    }
    let mut input = parse_macro_input!(item as ItemImpl);

    match expand(&mut input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &mut ItemImpl) -> syn::Result<proc_macro2::TokenStream> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[event_handlers] must be placed on an inherent impl block",
        ));
    }

    let mut routes = Vec::new();
    let mut seen: HashMap<String, syn::Ident> = HashMap::new();

    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        let Some(selector) = take_selector(method)? else {
            continue;
        };
        check_signature(method)?;

        let ident = method.sig.ident.clone();
        if let Some(previous) = seen.get(&selector) {
            return Err(syn::Error::new_spanned(
                &method.sig.ident,
                format!("selector `{selector}` is already handled by `{previous}`"),
            ));
        }
        seen.insert(selector.clone(), ident.clone());
        routes.push(Route {
            selector,
            method: ident,
        });
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();
    let arms = routes.iter().map(|route| {
        let selector = &route.selector;
        let method = &route.method;
        quote! {
            #selector => ::core::option::Option::Some(
                ::wicket::IntoOutcome::into_outcome(Self::#method(self, event))
            ),
        }
    });

    Ok(quote! {
        #input

        impl #impl_generics ::wicket::EventHandlers for #self_ty #where_clause {
            fn handle(
                &self,
                selector: &str,
                event: &mut ::wicket::WebhookEvent,
            ) -> ::core::option::Option<::core::result::Result<(), ::wicket::BoxError>> {
                match selector {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// The method's selector, if it is a route. Strips `#[on]`.
fn take_selector(method: &mut ImplItemFn) -> syn::Result<Option<String>> {
    let mut explicit = None;
    let mut error = None;
    method.attrs.retain(|attr| {
        if !attr.path().is_ident("on") {
            return true;
        }
        match attr.parse_args::<LitStr>() {
            Ok(lit) if explicit.is_none() => explicit = Some(lit),
            Ok(lit) => {
                error.get_or_insert(syn::Error::new_spanned(lit, "duplicate #[on] attribute"));
            }
            Err(err) => {
                error.get_or_insert(err);
            }
        }
        false
    });
    if let Some(err) = error {
        return Err(err);
    }

    if let Some(lit) = explicit {
        let event_type = lit.value();
        if event_type.is_empty() {
            return Err(syn::Error::new_spanned(lit, "event type must not be empty"));
        }
        return Ok(Some(selector_for(&event_type)));
    }

    let name = method.sig.ident.to_string();
    Ok(name
        .strip_prefix("event_")
        .filter(|rest| !rest.is_empty())
        .map(|rest| format!("{PREFIX}{}", pascal_case(rest))))
}

fn check_signature(method: &ImplItemFn) -> syn::Result<()> {
    let sig = &method.sig;
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "event handlers must not be async",
        ));
    }

    let mut inputs = sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => {
            return Err(syn::Error::new(
                sig.inputs.span(),
                "event handlers must take `&self` as their first argument",
            ));
        }
    }
    match (inputs.next(), inputs.next()) {
        (Some(FnArg::Typed(_)), None) => Ok(()),
        _ => Err(syn::Error::new(
            sig.inputs.span(),
            "event handlers take exactly one argument: `event: &mut WebhookEvent`",
        )),
    }
}

fn selector_for(event_type: &str) -> String {
    let mut selector = String::from(PREFIX);
    selector.extend(event_type.chars().filter(|c| *c != '/'));
    selector
}

fn pascal_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
