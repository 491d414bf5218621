//! Action discriminators.
//!
//! Several browser paths multiplex a handful of backend endpoints through an
//! `action` field (query string first, then JSON body). Each such family is
//! an enum implementing [`ActionSet`]: a static table from discriminator to
//! backend path template, plus a per-method default.
//!
//! A missing discriminator selects the default. An unknown one also selects
//! the default, unless strict mode is on, in which case it is a 400.

use std::fmt;

use axum::http::Method;

use crate::http::request::Inbound;
use crate::http::response::ApiError;

/// A family of backend endpoints selected by `action`.
pub trait ActionSet: Copy + PartialEq + fmt::Debug + 'static {
    /// Family name for logs.
    const FAMILY: &'static str;

    /// Every variant, in discriminator lookup order.
    const ALL: &'static [Self];

    /// Discriminator value selecting this variant.
    fn name(self) -> &'static str;

    /// Backend path template; `{param}` placeholders are filled from the request.
    fn path_template(self) -> &'static str;

    /// Variant used when no (or an unknown) discriminator is given.
    fn default_for(method: &Method) -> Self;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|action| action.name() == name)
    }
}

/// The outcome of resolving a discriminator.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch<A> {
    pub action: A,
    /// False when an unknown discriminator fell through to the default.
    pub recognized: bool,
}

impl<A: ActionSet> Dispatch<A> {
    pub fn resolve(raw: Option<&str>, method: &Method) -> Self {
        match raw {
            None => Self {
                action: A::default_for(method),
                recognized: true,
            },
            Some(name) => match A::from_name(name) {
                Some(action) => Self {
                    action,
                    recognized: true,
                },
                None => Self {
                    action: A::default_for(method),
                    recognized: false,
                },
            },
        }
    }
}

/// Resolve the family action for a browser request.
pub fn select<A: ActionSet>(inbound: &Inbound, strict: bool) -> Result<A, ApiError> {
    let raw = inbound.action();
    let dispatch = Dispatch::<A>::resolve(raw.as_deref(), &inbound.method);

    if !dispatch.recognized {
        let raw = raw.unwrap_or_default();
        if strict {
            return Err(ApiError::UnknownAction(raw));
        }
        tracing::warn!(
            family = A::FAMILY,
            action = %raw,
            fallback = dispatch.action.name(),
            "Unknown action, using default"
        );
    }
    Ok(dispatch.action)
}

/// Fill `{param}` placeholders of a template; every placeholder is required.
pub fn render_path(template: &str, inbound: &Inbound) -> Result<String, ApiError> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let name = &rest[open + 1..open + close];
        path.push_str(&rest[..open]);
        path.push_str(&inbound.require(name)?);
        rest = &rest[open + close + 1..];
    }
    path.push_str(rest);
    Ok(path)
}

/// Names of the placeholders in a template.
pub fn template_params(template: &str) -> Vec<&str> {
    template
        .split('{')
        .skip(1)
        .filter_map(|part| part.split_once('}').map(|(name, _)| name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::Payload;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Demo {
        List,
        Book,
    }

    impl ActionSet for Demo {
        const FAMILY: &'static str = "demo";
        const ALL: &'static [Self] = &[Demo::List, Demo::Book];

        fn name(self) -> &'static str {
            match self {
                Demo::List => "list",
                Demo::Book => "book",
            }
        }

        fn path_template(self) -> &'static str {
            match self {
                Demo::List => "/demo",
                Demo::Book => "/demo/{slotId}/book",
            }
        }

        fn default_for(_method: &Method) -> Self {
            Demo::List
        }
    }

    fn inbound(query: Option<&str>) -> Inbound {
        Inbound {
            method: Method::GET,
            query: query.map(str::to_string),
            cookie: None,
            request_id: None,
            payload: Payload::Empty,
            json: None,
        }
    }

    #[test]
    fn test_missing_discriminator_is_default() {
        let dispatch = Dispatch::<Demo>::resolve(None, &Method::GET);
        assert_eq!(dispatch, Dispatch { action: Demo::List, recognized: true });
    }

    #[test]
    fn test_unknown_discriminator_falls_through() {
        let dispatch = Dispatch::<Demo>::resolve(Some("bokk"), &Method::GET);
        assert_eq!(dispatch, Dispatch { action: Demo::List, recognized: false });

        assert_eq!(select::<Demo>(&inbound(Some("action=bokk")), false).unwrap(), Demo::List);
        assert!(matches!(
            select::<Demo>(&inbound(Some("action=bokk")), true),
            Err(ApiError::UnknownAction(raw)) if raw == "bokk"
        ));
    }

    #[test]
    fn test_render_path() {
        let req = inbound(Some("action=book&slotId=9"));
        assert_eq!(render_path(Demo::Book.path_template(), &req).unwrap(), "/demo/9/book");
        assert_eq!(render_path("/demo", &req).unwrap(), "/demo");

        let err = render_path(Demo::Book.path_template(), &inbound(Some("action=book"))).unwrap_err();
        assert_eq!(err.to_string(), "slotId is required");
    }

    #[test]
    fn test_template_params() {
        assert_eq!(template_params("/wellness/slots/{slotId}/book"), vec!["slotId"]);
        assert!(template_params("/jobs").is_empty());
    }
}
