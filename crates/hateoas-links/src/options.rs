//! Link templates and the option builders used to register them.
//!
//! Hrefs may contain replaceable tokens like `{id}` or `{name}`. At injection
//! time each token is replaced with the value of the wire-level field of the
//! same name on the decorated node.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LinkError;

/// HTTP method of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Connect,
    Options,
    Trace,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "HEAD" => Ok(Method::Head),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "CONNECT" => Ok(Method::Connect),
            "OPTIONS" => Ok(Method::Options),
            "TRACE" => Ok(Method::Trace),
            _ => Err(LinkError::UnknownMethod(s.to_string())),
        }
    }
}

/// A link to a resource. Registered with a tokenized `href`; emitted with the
/// tokens resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTemplate {
    pub method: Method,
    pub href: String,
    pub comment: String,
}

impl LinkTemplate {
    pub fn new(method: Method, href: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            method,
            href: href.into(),
            comment: comment.into(),
        }
    }

    /// Concrete link for `node`, with every resolvable token substituted.
    pub fn resolve(&self, node: &Map<String, Value>) -> LinkTemplate {
        LinkTemplate {
            method: self.method,
            href: crate::tokens::substitute(&self.href, node).into_owned(),
            comment: self.comment.clone(),
        }
    }

    /// Wire form: `{"method": ..., "href": ..., "comment": ...}`.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("method".to_string(), Value::from(self.method.as_str()));
        obj.insert("href".to_string(), Value::from(self.href.as_str()));
        obj.insert("comment".to_string(), Value::from(self.comment.as_str()));
        Value::Object(obj)
    }
}

/// Named link templates registered for one type.
pub type LinkSet = BTreeMap<String, LinkTemplate>;

/// One named entry to insert into a [`LinkSet`] at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOption {
    name: String,
    template: LinkTemplate,
}

impl LinkOption {
    /// Arbitrary action with a caller-chosen method.
    pub fn custom(name: impl Into<String>, template: LinkTemplate) -> Self {
        Self {
            name: name.into(),
            template,
        }
    }

    /// `self` link of a resource, usually an href with an id.
    pub fn self_link(href: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::custom("self", LinkTemplate::new(Method::Get, href, comment))
    }

    /// General index route of the resource's collection.
    pub fn index(href: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::custom("index", LinkTemplate::new(Method::Get, href, comment))
    }

    pub fn post(href: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::custom("post", LinkTemplate::new(Method::Post, href, comment))
    }

    pub fn put(href: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::custom("put", LinkTemplate::new(Method::Put, href, comment))
    }

    pub fn patch(href: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::custom("patch", LinkTemplate::new(Method::Patch, href, comment))
    }

    pub fn delete(href: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::custom("delete", LinkTemplate::new(Method::Delete, href, comment))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &LinkTemplate {
        &self.template
    }

    /// Insert this entry, overwriting any entry with the same name.
    pub fn apply(self, links: &mut LinkSet) {
        links.insert(self.name, self.template);
    }
}
